use chrono::NaiveTime;

use crate::model::store::{CreateStoreDto, StoreDto, UpdateStoreDto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_status: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Live category links.
    pub category_ids: Vec<i32>,
}

impl Store {
    pub fn from_entity(entity: entity::store::Model, category_ids: Vec<i32>) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.user_id,
            name: entity.name,
            address: entity.address,
            tel: entity.tel,
            open_status: entity.open_status,
            start_time: entity.start_time,
            end_time: entity.end_time,
            category_ids,
        }
    }

    pub fn into_dto(self) -> StoreDto {
        StoreDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            address: self.address,
            tel: self.tel,
            open_status: self.open_status,
            start_time: self.start_time,
            end_time: self.end_time,
            category_ids: self.category_ids,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateStoreParams {
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_status: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub category_ids: Vec<i32>,
}

impl CreateStoreParams {
    pub fn from_dto(dto: CreateStoreDto) -> Self {
        Self {
            owner_id: dto.owner_id,
            name: dto.name,
            address: dto.address,
            tel: dto.tel,
            open_status: dto.open_status,
            start_time: dto.start_time,
            end_time: dto.end_time,
            category_ids: dto.category_ids,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateStoreParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tel: Option<String>,
    pub open_status: Option<bool>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub category_ids: Option<Vec<i32>>,
}

impl UpdateStoreParams {
    pub fn from_dto(dto: UpdateStoreDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            tel: dto.tel,
            open_status: dto.open_status,
            start_time: dto.start_time,
            end_time: dto.end_time,
            category_ids: dto.category_ids,
        }
    }
}
