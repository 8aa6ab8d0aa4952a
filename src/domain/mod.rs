pub mod booking;
pub mod driver;
pub mod filter;
pub mod purchase;
pub mod record;
pub mod resource_kind;
pub mod sale;
pub mod vehicle;
pub mod window;
pub mod wire;

pub use filter::FilterKey;
pub use record::ReportRecord;
pub use resource_kind::ResourceKind;
pub use window::TimeWindow;
