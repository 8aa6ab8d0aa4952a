use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::domain::record::ReportRecord;
use crate::domain::wire::null_as_default;
use crate::services::export_service::Column;
use crate::services::validation::{FieldValidator, Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    #[default]
    Upi,
    Cash,
    Netbanking,
    CreditCard,
    DebitCard,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 5] = [
        PaymentMode::Upi,
        PaymentMode::Cash,
        PaymentMode::Netbanking,
        PaymentMode::CreditCard,
        PaymentMode::DebitCard,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Cash => "CASH",
            PaymentMode::Netbanking => "NETBANKING",
            PaymentMode::CreditCard => "CREDIT_CARD",
            PaymentMode::DebitCard => "DEBIT_CARD",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A vehicle sold to a customer, settled through a petrol pump.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_ref_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicle_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lorry_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lorry_hire: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commission: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bility: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_mode: PaymentMode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub petrol_pump: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_advance: f64,
}

impl Sale {
    /// `VH-` followed by eight uppercase hex characters, not already taken
    /// by one of `existing`.
    pub fn generate_vehicle_id(existing: &[Sale]) -> String {
        let taken: HashSet<&str> = existing.iter().map(|s| s.vehicle_id.as_str()).collect();
        loop {
            let simple = Uuid::new_v4().simple().to_string();
            let candidate = format!("VH-{}", simple[..8].to_uppercase());
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    pub fn hire_amount(sale: &Sale) -> f64 {
        sale.lorry_hire
    }

    pub fn export_columns() -> Vec<Column<Sale>> {
        vec![
            Column::new("Vehicle ID", |s: &Sale| s.vehicle_id.clone()),
            Column::new("Date", |s: &Sale| s.date.clone()),
            Column::new("Lorry Number", |s: &Sale| s.lorry_number.clone()),
            Column::new("Weight", |s: &Sale| s.weight.to_string()),
            Column::new("Lorry Hire", |s: &Sale| s.lorry_hire.to_string()),
            Column::new("Commission", |s: &Sale| s.commission.to_string()),
            Column::new("Bility", |s: &Sale| s.bility.to_string()),
            Column::new("Payment Mode", |s: &Sale| s.payment_mode.to_string()),
            Column::new("Petrol Pump", |s: &Sale| s.petrol_pump.clone()),
            Column::new("Total Advance", |s: &Sale| s.total_advance.to_string()),
        ]
    }
}

impl Validate for Sale {
    fn validate(&self) -> Result<(), ValidationErrors> {
        FieldValidator::new()
            .required("vehicleId", "Vehicle id", &self.vehicle_id)
            .required("date", "Date", &self.date)
            .required("lorryNumber", "Lorry number", &self.lorry_number)
            .min("weight", "Weight", self.weight, 1.0)
            .min("lorryHire", "Lorry hire", self.lorry_hire, 1.0)
            .min("commission", "Commission", self.commission, 0.0)
            .min("bility", "Bility", self.bility, 0.0)
            .min("totalAdvance", "Total advance", self.total_advance, 0.0)
            .finish()
    }
}

impl ReportRecord for Sale {
    type Id = u64;

    fn record_id(&self) -> Option<u64> {
        self.id
    }

    fn occurred_on(&self) -> &str {
        &self.date
    }
}
