use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "p_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
    pub deleted_at: Option<DateTimeUtc>,
    pub deleted_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::store_category::Entity")]
    StoreCategory,
}

impl Related<super::store_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreCategory.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        super::store_category::Relation::Store.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::store_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
