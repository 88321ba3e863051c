use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateBuildingRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub floors_count: i32,
    pub units_per_floor: i32,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBuildingRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub floors_count: Option<i32>,
    pub units_per_floor: Option<i32>,
    pub description: Option<String>,
}
