use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "p_menu")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    /// Visibility flag; always false once the menu is tombstoned.
    pub public_status: bool,
    pub menu_image: Option<String>,
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
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Store,
    #[sea_orm(has_many = "super::menu_order::Entity")]
    MenuOrder,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::menu_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
