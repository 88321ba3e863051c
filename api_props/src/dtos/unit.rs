use db::models::unit::UnitStatus;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct UnitListQuery {
    pub building_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    pub building_id: Uuid,
    pub unit_number: String,
    pub floor_number: i32,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    pub area: Option<f64>,
    pub rent_amount: Option<i64>,
    pub status: Option<UnitStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUnitRequest {
    pub unit_number: Option<String>,
    pub floor_number: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub rent_amount: Option<i64>,
    pub status: Option<UnitStatus>,
    pub description: Option<String>,
}
