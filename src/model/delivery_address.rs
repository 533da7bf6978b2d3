use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryAddressDto {
    pub id: i32,
    pub user_id: i32,
    pub address: String,
    pub request: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDeliveryAddressDto {
    pub address: String,
    #[serde(default)]
    pub request: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDeliveryAddressDto {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub request: Option<String>,
}
