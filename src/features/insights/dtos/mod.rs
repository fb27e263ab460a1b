mod insights_dto;

pub use insights_dto::{CategoryCount, InsightsDto, LocationCount};
