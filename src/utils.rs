use std::fs;
use std::io;
use std::path::Path;
use time::macros::format_description;
use time::UtcOffset;
use tracing_subscriber::fmt::time::{LocalTime, UtcTime};
use tracing_subscriber::EnvFilter;

pub const USAGE: &str = "Usage: tabtree <input.tree>";

/// `RUST_LOG` wins when set; otherwise `--verbose` picks info over error.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    // The local offset is unavailable on some platforms once threads exist.
    if UtcOffset::current_local_offset().is_ok() {
        builder
            .with_timer(LocalTime::new(format_description!(
                "[hour]:[minute]:[second].[subsecond digits:3]"
            )))
            .init();
    } else {
        builder
            .with_timer(UtcTime::new(format_description!(
                "[hour]:[minute]:[second].[subsecond digits:3]Z"
            )))
            .init();
    }
}

pub fn format_number(num: usize) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let (Some(input), Some(output)) = (&args.input, &args.output) {
        if input == output || same_file(input, output) {
            anyhow::bail!("--output must differ from the input file");
        }
    }

    if args.favicon_service.trim().is_empty() {
        anyhow::bail!("--favicon-service must not be empty");
    }

    Ok(())
}

/// Whether `output` names the existing file `input`. The output need not
/// exist yet, so its parent directory is resolved instead.
fn same_file(input: &Path, output: &Path) -> bool {
    let Ok(input) = fs::canonicalize(input) else {
        return false;
    };
    if let Ok(output) = fs::canonicalize(output) {
        return input == output;
    }

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), output.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name) == input,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;
    use std::ffi::OsStr;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_validate_args_rejects_overwriting_input() {
        let args = Args::try_parse_from(["tabtree", "a.tree", "-o", "a.tree"]).unwrap();
        assert!(validate_args(&args).is_err());

        let args = Args::try_parse_from(["tabtree", "a.tree", "-o", "a.html"]).unwrap();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_rejects_same_file_spelled_differently() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.tree");
        fs::write(&input, "[]").unwrap();
        let dotted = dir.path().join(".").join("a.tree");
        let sibling = dir.path().join("sub").join("..").join("a.tree");
        fs::create_dir(dir.path().join("sub")).unwrap();

        for output in [&dotted, &sibling] {
            let args = Args::try_parse_from([
                OsStr::new("tabtree"),
                input.as_os_str(),
                OsStr::new("-o"),
                output.as_os_str(),
            ])
            .unwrap();
            assert!(validate_args(&args).is_err(), "{output:?} should be rejected");
        }

        let args = Args::try_parse_from([
            OsStr::new("tabtree"),
            input.as_os_str(),
            OsStr::new("-o"),
            dir.path().join("a.html").as_os_str(),
        ])
        .unwrap();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_rejects_blank_favicon_service() {
        let args = Args::try_parse_from(["tabtree", "a.tree", "--favicon-service", " "]).unwrap();
        assert!(validate_args(&args).is_err());
    }
}
