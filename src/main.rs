use anyhow::Result;
use clap::Parser;
use tracing::error;

use tabtree::{pipeline, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    let Some(input) = args.input.as_deref() else {
        println!("{}", utils::USAGE);
        return Ok(());
    };

    utils::validate_args(&args)?;

    match pipeline::convert_tree(input, &args.convert_options()) {
        Ok(summary) => {
            pipeline::print_conversion_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
