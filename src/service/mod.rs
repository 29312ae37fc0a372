//! Service layer: scan orchestration and scheduling.
//!
//! [`ScanService`] drives one scan end to end; [`ScanScheduler`] fires it
//! on a fixed interval alongside the HTTP trigger.

pub mod scan_service;
pub mod scheduler;

pub use scan_service::ScanService;
pub use scheduler::{SCHEDULE_TRIGGER, ScanScheduler};
