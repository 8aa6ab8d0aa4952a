use serde::{Deserialize, Serialize};

use crate::domain::wire::null_as_default;
use crate::services::validation::{FieldValidator, Validate, ValidationErrors};

pub const VEHICLE_STATUS_AVAILABLE: &str = "AVAILABLE";
pub const VEHICLE_STATUS_BOOKED: &str = "BOOKED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_reg_no: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permit_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub driver_mob: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capacity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_vehicle_status", deserialize_with = "null_as_default")]
    pub vehicle_status: String,
}

fn default_vehicle_status() -> String {
    VEHICLE_STATUS_AVAILABLE.to_string()
}

impl Vehicle {
    pub fn new(vehicle_reg_no: String, vehicle_type: String) -> Self {
        Self {
            id: None,
            vehicle_reg_no,
            permit_level: String::new(),
            driver_mob: 0,
            vehicle_type,
            price: 0.0,
            capacity: 0.0,
            origin_city: String::new(),
            destination_city: String::new(),
            description: String::new(),
            vehicle_status: default_vehicle_status(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.vehicle_status == VEHICLE_STATUS_AVAILABLE
    }
}

impl Validate for Vehicle {
    fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("vehicleRegNo", "Vehicle reg no", &self.vehicle_reg_no)
            .min_length("vehicleRegNo", "Vehicle reg no", &self.vehicle_reg_no, 4)
            .required("permitLevel", "Permit level", &self.permit_level)
            .range(
                "driverMob",
                "Mobile number must be 10 digits",
                self.driver_mob,
                1_000_000_000,
                9_999_999_999,
            )
            .required("vehicleType", "Vehicle type", &self.vehicle_type)
            .min("price", "Price", self.price, 0.1)
            .min("capacity", "Capacity", self.capacity, 1.0)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_vehicle() -> Vehicle {
        let mut vehicle = Vehicle::new("MH12AB1234".to_string(), "TRUCK".to_string());
        vehicle.permit_level = "NATIONAL".to_string();
        vehicle.driver_mob = 9_876_543_210;
        vehicle.price = 1_500_000.0;
        vehicle.capacity = 16.0;
        vehicle
    }

    #[test]
    fn test_valid_vehicle_passes() {
        assert!(valid_vehicle().validate().is_ok());
        assert!(valid_vehicle().is_available());
    }

    #[test]
    fn test_vehicle_field_errors() {
        let mut vehicle = valid_vehicle();
        vehicle.vehicle_reg_no = "MH1".to_string();
        vehicle.driver_mob = 12345;
        vehicle.price = 0.0;
        vehicle.capacity = 0.5;

        let errors = vehicle.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.for_field("vehicleRegNo").unwrap().reason,
            "Vehicle reg no must be at least 4 characters"
        );
        assert_eq!(
            errors.for_field("driverMob").unwrap().reason,
            "Mobile number must be 10 digits"
        );
        assert!(errors.has_field("price"));
        assert!(errors.has_field("capacity"));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": 3,
            "vehicleRegNo": "KA05M0001",
            "permitLevel": "STATE",
            "driverMob": 9123456780,
            "vehicleType": "TRAILER",
            "price": 2500000,
            "capacity": 32
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.id, Some(3));
        assert_eq!(vehicle.vehicle_status, VEHICLE_STATUS_AVAILABLE);
        assert_eq!(vehicle.origin_city, "");

        let out = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(out["vehicleRegNo"], "KA05M0001");
        assert_eq!(out["vehicleStatus"], "AVAILABLE");
    }
}
