use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuDto {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub public_status: bool,
    pub menu_image: Option<String>,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuDto {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_public")]
    pub public_status: bool,
    #[serde(default)]
    pub menu_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public_status: Option<bool>,
    #[serde(default)]
    pub menu_image: Option<String>,
}
