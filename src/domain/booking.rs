use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::record::ReportRecord;
use crate::domain::vehicle::{VEHICLE_STATUS_BOOKED, Vehicle};
use crate::domain::wire::null_as_default;
use crate::services::export_service::Column;
use crate::services::validation::{FieldValidator, Validate, ValidationErrors};

pub const BOOKING_STATUS_PENDING: &str = "PENDING";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub started_from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_no: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub driver_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_hire: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_advance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_balance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_received_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detain: String,
    #[serde(default)]
    pub pod_received: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pod_document: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lorry_balance_paid_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_status: String,
}

impl Booking {
    /// A pending booking prefilled from the vehicle being booked.
    pub fn for_vehicle(vehicle: &Vehicle, vehicle_id: u64, booking_date: NaiveDate) -> Self {
        Self {
            id: None,
            booking_id: format!("BK-{}", Utc::now().timestamp_millis()),
            booking_date: booking_date.format("%Y-%m-%d").to_string(),
            vehicle_id,
            vehicle_no: vehicle.vehicle_reg_no.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            booking_status: BOOKING_STATUS_PENDING.to_string(),
            vehicle_status: VEHICLE_STATUS_BOOKED.to_string(),
            ..Default::default()
        }
    }

    pub fn hire_amount(booking: &Booking) -> f64 {
        booking.booking_hire
    }

    pub fn export_columns() -> Vec<Column<Booking>> {
        vec![
            Column::new("Booking ID", |b: &Booking| b.booking_id.clone()),
            Column::new("Vehicle ID", |b: &Booking| b.vehicle_id.to_string()),
            Column::new("Date", |b: &Booking| b.booking_date.clone()),
            Column::new("Started From", |b: &Booking| b.started_from.clone()),
            Column::new("Destination", |b: &Booking| b.destination.clone()),
            Column::new("Driver Name", |b: &Booking| b.driver_name.clone()),
            Column::new("Booking Status", |b: &Booking| b.booking_status.clone()),
        ]
    }
}

impl Validate for Booking {
    fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("bookingDate", "Booking date", &self.booking_date)
            .required("startedFrom", "Started from", &self.started_from)
            .required("destination", "Destination", &self.destination)
            .min("bookingHire", "Booking hire", self.booking_hire, 0.0)
            .required("bookingStatus", "Booking status", &self.booking_status)
            .required("vehicleStatus", "Vehicle status", &self.vehicle_status)
            .finish()
    }
}

impl ReportRecord for Booking {
    type Id = u64;

    fn record_id(&self) -> Option<u64> {
        self.id
    }

    fn occurred_on(&self) -> &str {
        &self.booking_date
    }
}
