pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;
pub mod projection;

pub use constants::*;
pub use coordinates::{dec_to_decimal, ra_to_decimal, radians_to_decimal};
pub use filename::{generate_default_export_dir, table_parquet_path};
pub use progress::ProgressReporter;
pub use projection::{radec_rad_to_cartesian, radec_to_cartesian};
