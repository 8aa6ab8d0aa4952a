use serde::{Deserialize, Serialize};
use std::fmt;

/// The REST resources the back office manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Vehicles,
    Drivers,
    Bookings,
    Purchases,
    Sales,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Vehicles,
        ResourceKind::Drivers,
        ResourceKind::Bookings,
        ResourceKind::Purchases,
        ResourceKind::Sales,
    ];

    /// Path of the collection endpoint below the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Vehicles => "/api/vehicles",
            ResourceKind::Drivers => "/api/drivers",
            ResourceKind::Bookings => "/api/bookings",
            ResourceKind::Purchases => "/api/vehicle-purchases",
            ResourceKind::Sales => "/api/vehicle-sales",
        }
    }

    /// Key under which unsynced writes of this kind are cached locally.
    pub fn cache_key(&self) -> &'static str {
        match self {
            ResourceKind::Vehicles => "vehicles",
            ResourceKind::Drivers => "drivers",
            ResourceKind::Bookings => "bookings",
            ResourceKind::Purchases => "purchases",
            ResourceKind::Sales => "sales",
        }
    }

    /// Singular noun for messages
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Vehicles => "vehicle",
            ResourceKind::Drivers => "driver",
            ResourceKind::Bookings => "booking",
            ResourceKind::Purchases => "purchase",
            ResourceKind::Sales => "sale",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cache_key())
    }
}
