mod report;

pub use report::{
    CreateReport, NearFilter, Report, ReportCategory, ReportFilter, ReportPriority, ReportStatus,
    ReportWithReporter,
};
