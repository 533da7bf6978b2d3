use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoreDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub tel: String,
    pub open_status: bool,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "21:00:00")]
    pub end_time: NaiveTime,
    pub category_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateStoreDto {
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub tel: String,
    #[serde(default)]
    pub open_status: bool,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "21:00:00")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateStoreDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub open_status: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub end_time: Option<NaiveTime>,
    /// Replaces the store's category links when present.
    #[serde(default)]
    pub category_ids: Option<Vec<i32>>,
}
