pub mod api_client;
pub mod error_handling;
pub mod export_service;
pub mod notification;
pub mod report_engine;
pub mod report_screen;
pub mod submission_service;
#[cfg(test)]
mod test_server;
pub mod validation;

pub use api_client::{ApiClient, DriverClient, RecordSource, ResourceClient};
pub use error_handling::{DeskError, DeskResult};
pub use report_engine::{AggregateResult, ReportEngine, ReportState, WindowStats};
pub use report_screen::{ReportScreen, ScreenMessages, ScreenUpdate};
pub use submission_service::{SubmissionService, SubmitOutcome, SyncReport};
