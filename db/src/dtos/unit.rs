use uuid::Uuid;

use crate::models::unit::UnitStatus;

pub struct NewUnit {
    pub building_id: Uuid,
    pub unit_number: String,
    pub floor_number: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: Option<f64>,
    pub rent_amount: Option<i64>,
    pub status: UnitStatus,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct UnitPatch {
    pub unit_number: Option<String>,
    pub floor_number: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub rent_amount: Option<i64>,
    pub status: Option<UnitStatus>,
    pub description: Option<String>,
}

impl UnitPatch {
    pub fn is_empty(&self) -> bool {
        self.unit_number.is_none()
            && self.floor_number.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.area.is_none()
            && self.rent_amount.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }
}
