use uuid::Uuid;

pub struct NewBuilding {
    pub customer_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub floors_count: i32,
    pub units_per_floor: i32,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct BuildingPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub floors_count: Option<i32>,
    pub units_per_floor: Option<i32>,
    pub description: Option<String>,
}

impl BuildingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.floors_count.is_none()
            && self.units_per_floor.is_none()
            && self.description.is_none()
    }
}
