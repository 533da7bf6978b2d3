use crate::model::delivery_address::{
    CreateDeliveryAddressDto, DeliveryAddressDto, UpdateDeliveryAddressDto,
};

/// Live addresses a single user may keep at once.
pub const MAX_ADDRESSES_PER_USER: u64 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAddress {
    pub id: i32,
    pub user_id: i32,
    pub address: String,
    pub request: Option<String>,
}

impl DeliveryAddress {
    pub fn from_entity(entity: entity::delivery_address::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            address: entity.address,
            request: entity.request,
        }
    }

    pub fn into_dto(self) -> DeliveryAddressDto {
        DeliveryAddressDto {
            id: self.id,
            user_id: self.user_id,
            address: self.address,
            request: self.request,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateDeliveryAddressParams {
    pub address: String,
    pub request: Option<String>,
}

impl CreateDeliveryAddressParams {
    pub fn from_dto(dto: CreateDeliveryAddressDto) -> Self {
        Self {
            address: dto.address.trim().to_string(),
            request: dto.request,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDeliveryAddressParams {
    pub address: Option<String>,
    pub request: Option<String>,
}

impl UpdateDeliveryAddressParams {
    pub fn from_dto(dto: UpdateDeliveryAddressDto) -> Self {
        Self {
            address: dto.address.map(|a| a.trim().to_string()),
            request: dto.request,
        }
    }
}
