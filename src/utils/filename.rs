use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

fn date_stamp() -> String {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    format!("{:02}{:02}{:02}", year, now.month(), now.day())
}

/// Generate default CSV filename with format: eto-daily-{YYMMDD}.csv
pub fn generate_default_csv_filename(dir: &Path) -> PathBuf {
    dir.join(format!("eto-daily-{}.csv", date_stamp()))
}

/// Generate default Parquet filename with format: eto-daily-{YYMMDD}.parquet
pub fn generate_default_parquet_filename(dir: &Path) -> PathBuf {
    dir.join(format!("eto-daily-{}.parquet", date_stamp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_csv_filename() {
        let filename = generate_default_csv_filename(Path::new("output"));
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));
        assert!(filename_str.ends_with(".csv"));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert!(file_part.starts_with("eto-daily-"));
        // eto-daily- + YYMMDD + .csv
        assert_eq!(file_part.len(), "eto-daily-".len() + 6 + ".csv".len());
    }

    #[test]
    fn test_generate_default_parquet_filename() {
        let filename = generate_default_parquet_filename(Path::new("out"));
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("eto-daily-"));
        assert!(filename_str.ends_with(".parquet"));
        assert!(filename_str.starts_with("out/"));
    }
}
