use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::record::ReportRecord;
use crate::domain::wire::null_as_default;
use crate::services::export_service::Column;
use crate::services::validation::{FieldValidator, Validate, ValidationErrors};

/// A vehicle hired in from another transporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_no: String,
    /// Free text on the wire
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_hire: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_receiving_balance_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transport_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_received_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lorry_balance_paid_date: Option<String>,
}

impl Purchase {
    /// The hire as a number; text that is not a number counts as zero.
    pub fn hire_amount(purchase: &Purchase) -> f64 {
        let raw = purchase.booking_hire.trim().replace(',', "");
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                if !raw.is_empty() {
                    debug!(
                        purchase_id = ?purchase.id,
                        booking_hire = %purchase.booking_hire,
                        "Non-numeric booking hire counted as zero"
                    );
                }
                0.0
            }
        }
    }

    pub fn export_columns() -> Vec<Column<Purchase>> {
        vec![
            Column::new("ID", |p: &Purchase| {
                p.id.map(|id| id.to_string()).unwrap_or_default()
            }),
            Column::new("Vehicle No", |p: &Purchase| p.vehicle_no.clone()),
            Column::new("From Location", |p: &Purchase| p.from_location.clone()),
            Column::new("To Location", |p: &Purchase| p.to_location.clone()),
            Column::new("Transport Name", |p: &Purchase| p.transport_name.clone()),
            Column::new("Booking Hire", |p: &Purchase| p.booking_hire.clone()),
            Column::new("Detain", |p: &Purchase| p.detain.clone()),
            Column::new("Date", |p: &Purchase| p.date.clone()),
        ]
    }
}

impl Validate for Purchase {
    fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("date", "Date", &self.date)
            .required("vehicleNo", "Vehicle no", &self.vehicle_no)
            .required("bookingHire", "Booking hire", &self.booking_hire)
            .required("fromLocation", "From location", &self.from_location)
            .required("toLocation", "To location", &self.to_location)
            .required("transportName", "Transport name", &self.transport_name)
            .finish()
    }
}

impl ReportRecord for Purchase {
    type Id = u64;

    fn record_id(&self) -> Option<u64> {
        self.id
    }

    fn occurred_on(&self) -> &str {
        &self.date
    }
}
