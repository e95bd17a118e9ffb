pub mod params;
pub mod reporting;
