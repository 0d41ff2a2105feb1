//! CLI argument definitions using clap derive macros.

use clap::Parser;
use std::path::PathBuf;

/// Download tracks, albums and artwork from a Bandcamp page.
///
/// Files land in OUTPUT (default: the directory of this executable). Album
/// tracks go into an `<artist> - <album>` subdirectory.
#[derive(Parser, Debug)]
#[command(name = "campdown")]
#[command(author, version, about)]
pub struct Args {
    /// Track or album page URL
    pub url: String,

    /// Output directory
    pub output: Option<PathBuf>,

    /// Overwrite existing files without comparing their size
    #[arg(short, long)]
    pub force: bool,

    /// Maximum concurrent track downloads (1-16)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub jobs: u8,

    /// Maximum retry attempts for transient failures (0-10)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub retries: u8,

    /// Hide progress bars and suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args() {
        let args = Args::try_parse_from(["campdown", "https://a.bandcamp.com/track/b"]).unwrap();
        assert_eq!(args.url, "https://a.bandcamp.com/track/b");
        assert!(args.output.is_none());
        assert!(!args.force);
        assert_eq!(args.jobs, 1);
        assert_eq!(args.retries, 3);
        assert!(!args.quiet);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_cli_output_and_flags() {
        let args = Args::try_parse_from([
            "campdown",
            "https://a.bandcamp.com/album/c",
            "music",
            "--force",
            "-j",
            "4",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("music")));
        assert!(args.force);
        assert_eq!(args.jobs, 4);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_requires_url() {
        let err = Args::try_parse_from(["campdown"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_rejects_zero_jobs() {
        assert!(Args::try_parse_from(["campdown", "https://a.bandcamp.com", "-j", "0"]).is_err());
    }
}
