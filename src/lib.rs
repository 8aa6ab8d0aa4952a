//! Back-office reporting and data entry for a transport company: date-window
//! reports over REST resources, exports, and form submission with an
//! offline fallback.

pub mod config;
pub mod domain;
pub mod logging;
pub mod repository;
pub mod services;
