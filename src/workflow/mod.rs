pub mod harvest_flow;

pub use harvest_flow::{CrawlReport, ExportReport, HarvestFlow};
