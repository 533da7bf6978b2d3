use crate::model::menu::{CreateMenuDto, MenuDto, UpdateMenuDto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub public_status: bool,
    pub menu_image: Option<String>,
}

impl Menu {
    pub fn from_entity(entity: entity::menu::Model) -> Self {
        Self {
            id: entity.id,
            store_id: entity.store_id,
            name: entity.name,
            price: entity.price,
            description: entity.description,
            public_status: entity.public_status,
            menu_image: entity.menu_image,
        }
    }

    pub fn into_dto(self) -> MenuDto {
        MenuDto {
            id: self.id,
            store_id: self.store_id,
            name: self.name,
            price: self.price,
            description: self.description,
            public_status: self.public_status,
            menu_image: self.menu_image,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMenuParams {
    pub store_id: i32,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub public_status: bool,
    pub menu_image: Option<String>,
}

impl CreateMenuParams {
    pub fn from_dto(store_id: i32, dto: CreateMenuDto) -> Self {
        Self {
            store_id,
            name: dto.name,
            price: dto.price,
            description: dto.description,
            public_status: dto.public_status,
            menu_image: dto.menu_image,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMenuParams {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub public_status: Option<bool>,
    pub menu_image: Option<String>,
}

impl UpdateMenuParams {
    pub fn from_dto(dto: UpdateMenuDto) -> Self {
        Self {
            name: dto.name,
            price: dto.price,
            description: dto.description,
            public_status: dto.public_status,
            menu_image: dto.menu_image,
        }
    }
}
