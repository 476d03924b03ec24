//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA: &str = "hdb_resale.json";
pub const DEFAULT_YEAR: i32 = 2020;

/// PNG export size limits, shared by the CLI flags and the export panel.
pub const DEFAULT_EXPORT_WIDTH: u32 = 1200;
pub const DEFAULT_EXPORT_HEIGHT: u32 = 700;
pub const MIN_EXPORT_WIDTH: u32 = 320;
pub const MIN_EXPORT_HEIGHT: u32 = 240;
pub const MAX_EXPORT_SIDE: u32 = 8000;

#[derive(Parser, Debug, Clone)]
#[command(name = "hdb-dashboard", version, about = "Dashboard for HDB resale data")]
pub struct Cli {
    /// JSON file with a `result.records` array of resale transactions
    #[arg(long, env = "HDB_DATA", default_value = DEFAULT_DATA)]
    pub data: PathBuf,

    /// Year selected when the dashboard opens (snapped to the nearest year in the data)
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Render the three charts for `--year` as PNG files into this folder and exit
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Exported image width in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_EXPORT_WIDTH,
        value_parser = clap::value_parser!(u32).range(MIN_EXPORT_WIDTH as i64..=MAX_EXPORT_SIDE as i64)
    )]
    pub width: u32,

    /// Exported image height in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_EXPORT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(MIN_EXPORT_HEIGHT as i64..=MAX_EXPORT_SIDE as i64)
    )]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hdb-dashboard"]).unwrap();
        assert_eq!(cli.year, DEFAULT_YEAR);
        assert_eq!((cli.width, cli.height), (DEFAULT_EXPORT_WIDTH, DEFAULT_EXPORT_HEIGHT));
        assert!(cli.export_dir.is_none());
    }

    #[test]
    fn test_export_flags() {
        let cli = Cli::try_parse_from([
            "hdb-dashboard",
            "--data",
            "resale.json",
            "--year",
            "2018",
            "--export-dir",
            "out",
            "--width",
            "800",
        ])
        .unwrap();
        assert_eq!(cli.data, PathBuf::from("resale.json"));
        assert_eq!(cli.year, 2018);
        assert_eq!(cli.export_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.width, 800);
    }

    #[test]
    fn test_rejects_tiny_export() {
        assert!(Cli::try_parse_from(["hdb-dashboard", "--width", "10"]).is_err());
    }

    #[test]
    fn test_export_size_upper_limit() {
        let max = MAX_EXPORT_SIDE.to_string();
        let over = (MAX_EXPORT_SIDE + 1).to_string();

        let cli = Cli::try_parse_from(["hdb-dashboard", "--width", &max, "--height", &max]).unwrap();
        assert_eq!((cli.width, cli.height), (MAX_EXPORT_SIDE, MAX_EXPORT_SIDE));
        assert!(Cli::try_parse_from(["hdb-dashboard", "--width", &over]).is_err());
        assert!(Cli::try_parse_from(["hdb-dashboard", "--height", &over]).is_err());
    }
}
