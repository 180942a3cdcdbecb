use clap::Parser;
use std::path::PathBuf;

use crate::model::DateZone;
use crate::pipeline::ConvertOptions;
use crate::report::DEFAULT_FAVICON_SERVICE;

#[derive(Parser, Debug)]
#[command(
    name = "tabtree",
    about = "Convert a browser tab-tree export into an HTML report grouped by domain",
    version,
    long_about = None
)]
pub struct Args {
    /// Tab-tree export to convert (JSON)
    pub input: Option<PathBuf>,

    /// Write the report here instead of next to the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compute access dates in UTC instead of the local time zone
    #[arg(long)]
    pub utc: bool,

    /// Favicon endpoint used for tabs and domains without an icon
    #[arg(long, default_value = DEFAULT_FAVICON_SERVICE)]
    pub favicon_service: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            output: self.output.clone(),
            zone: if self.utc { DateZone::Utc } else { DateZone::Local },
            favicon_service: self.favicon_service.clone(),
        }
    }
}
