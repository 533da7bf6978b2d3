use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "p_store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_status: bool,
    pub start_time: Time,
    pub end_time: Time,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
    pub deleted_at: Option<DateTimeUtc>,
    pub deleted_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::menu::Entity")]
    Menu,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::store_category::Entity")]
    StoreCategory,
    #[sea_orm(has_many = "super::ai_suggestion::Entity")]
    AiSuggestion,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::store_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreCategory.def()
    }
}

impl Related<super::ai_suggestion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiSuggestion.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::store_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::store_category::Relation::Store.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
