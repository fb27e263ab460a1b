mod insights_service;

pub use insights_service::InsightsService;
