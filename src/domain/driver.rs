use serde::{Deserialize, Serialize};

use crate::domain::record::ReportRecord;
use crate::domain::wire::null_as_default;
use crate::services::export_service::Column;
use crate::services::validation::{
    CONTACT_NUMBER_PATTERN, FieldValidator, VEHICLE_NO_PATTERN, Validate, ValidationErrors,
};

/// A driver trip entry: who drove which vehicle where, and with what load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_no: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub driver_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub started_from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carry_material_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
}

impl Driver {
    pub fn export_columns() -> Vec<Column<Driver>> {
        vec![
            Column::new("Sl. No", |d: &Driver| {
                d.serial_no.map(|n| n.to_string()).unwrap_or_default()
            }),
            Column::new("Date", |d: &Driver| d.date.clone()),
            Column::new("Vehicle No", |d: &Driver| d.vehicle_no.clone()),
            Column::new("Driver Name", |d: &Driver| d.driver_name.clone()),
            Column::new("Started From", |d: &Driver| d.started_from.clone()),
            Column::new("To", |d: &Driver| d.destination.clone()),
            Column::new("Type of Material Carry", |d: &Driver| {
                d.carry_material_type.clone()
            }),
            Column::new("Contact No", |d: &Driver| d.contact_number.clone()),
            Column::new("Address", |d: &Driver| d.address.clone()),
        ]
    }
}

impl Validate for Driver {
    fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("date", "Date", &self.date)
            .required("vehicleNo", "Vehicle no", &self.vehicle_no)
            .pattern("vehicleNo", "Vehicle no", &self.vehicle_no, &VEHICLE_NO_PATTERN)
            .required("driverName", "Driver name", &self.driver_name)
            .required("startedFrom", "Started from", &self.started_from)
            .required("destination", "Destination", &self.destination)
            .required("carryMaterialType", "Material type", &self.carry_material_type)
            .required("contactNumber", "Contact number", &self.contact_number)
            .pattern(
                "contactNumber",
                "Contact number",
                &self.contact_number,
                &CONTACT_NUMBER_PATTERN,
            )
            .required("address", "Address", &self.address)
            .finish()
    }
}

impl ReportRecord for Driver {
    type Id = u64;

    fn record_id(&self) -> Option<u64> {
        self.id
    }

    fn occurred_on(&self) -> &str {
        &self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> Driver {
        Driver {
            id: Some(11),
            serial_no: Some(4),
            date: "2024-03-12".to_string(),
            vehicle_no: "MH12AB1234".to_string(),
            driver_name: "Ramesh Kumar".to_string(),
            started_from: "Pune".to_string(),
            destination: "Nagpur".to_string(),
            carry_material_type: "Cement".to_string(),
            contact_number: "9876543210".to_string(),
            address: "Hadapsar, Pune".to_string(),
        }
    }

    #[test]
    fn test_valid_trip() {
        assert!(trip().validate().is_ok());
    }

    #[test]
    fn test_plate_and_phone_patterns() {
        let mut driver = trip();
        driver.vehicle_no = "mh12ab1234".to_string();
        driver.contact_number = "98765".to_string();

        let errors = driver.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field("vehicleNo").unwrap().reason,
            "Vehicle no has an invalid format"
        );
        assert!(errors.has_field("contactNumber"));
    }

    #[test]
    fn test_empty_form_lists_required_fields() {
        let errors = Driver::default().validate().unwrap_err();
        for field in [
            "date",
            "vehicleNo",
            "driverName",
            "startedFrom",
            "destination",
            "carryMaterialType",
            "contactNumber",
            "address",
        ] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
        assert_eq!(errors.for_field("date").unwrap().reason, "Date is required");
    }

    #[test]
    fn test_export_columns_match_driver_list() {
        let columns = Driver::export_columns();
        let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
        assert_eq!(headers[0], "Sl. No");
        assert_eq!(headers.len(), 9);

        let driver = trip();
        assert_eq!(columns[0].value(&driver), "4");
        assert_eq!(columns[5].value(&driver), "Nagpur");
    }

    #[test]
    fn test_report_record() {
        let driver = trip();
        assert_eq!(driver.record_id(), Some(11));
        assert_eq!(driver.occurred_on(), "2024-03-12");
        assert!(driver.occurred_on_date().is_ok());
    }
}
