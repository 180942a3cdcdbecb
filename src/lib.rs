pub mod args;
pub mod dedupe;
pub mod domain;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod tree;
pub mod utils;

pub use args::Args;
pub use domain::{group_by_domain, registrable_domain, Grouping};
pub use model::{AccessDates, ConversionSummary, DateRange, DateZone, Tab};
pub use pipeline::{convert_tree, ConvertOptions};
pub use report::ReportRenderer;
pub use tree::{extract_tabs, Extraction};
