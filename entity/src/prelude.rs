pub use super::ai_suggestion::Entity as AiSuggestion;
pub use super::category::Entity as Category;
pub use super::delivery_address::Entity as DeliveryAddress;
pub use super::menu::Entity as Menu;
pub use super::menu_order::Entity as MenuOrder;
pub use super::order::Entity as Order;
pub use super::payment::Entity as Payment;
pub use super::review::Entity as Review;
pub use super::store::Entity as Store;
pub use super::store_category::Entity as StoreCategory;
pub use super::user::Entity as User;
