use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Generate default export directory with format: output/catalogs-{YYMMDD}
pub fn generate_default_export_dir() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let dirname = format!("catalogs-{:02}{:02}{:02}", year, month, day);
    PathBuf::from("output").join(dirname)
}

/// Parquet file path for an exported table inside `dir`
pub fn table_parquet_path(dir: &Path, table_name: &str) -> PathBuf {
    dir.join(format!("{}.parquet", table_name))
}
