#![forbid(unsafe_code)]

pub mod error;
pub mod insights_service;
pub mod motivation;
pub mod report_service;
pub mod report_view;

pub use aptly_core::Clock;

pub use error::{InsightsError, ReportServiceError};
pub use insights_service::InsightsService;
pub use motivation::MotivationCalculator;
pub use report_service::SessionReportService;
pub use report_view::{ReportDetail, ReportListItem};
