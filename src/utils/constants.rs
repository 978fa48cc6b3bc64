/// Exported table names
pub const TABLE_HARRIS_IDENT_POS: &str = "harris_ident_pos";
pub const TABLE_HARRIS_METALLICITY_PHOTOMETRY: &str = "harris_metallicity_photometry";
pub const TABLE_HARRIS_VELOCITY_STRUCT_PARAMS: &str = "harris_velocity_struct_params";
pub const TABLE_GAIA: &str = "gaia";

pub const TABLE_NAMES: [&str; 4] = [
    TABLE_HARRIS_IDENT_POS,
    TABLE_HARRIS_METALLICITY_PHOTOMETRY,
    TABLE_HARRIS_VELOCITY_STRUCT_PARAMS,
    TABLE_GAIA,
];

/// File names
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const HARRIS_IDENT_POS_FILE: &str = "harris_pt1.csv";
pub const HARRIS_METALLICITY_PHOTOMETRY_FILE: &str = "harris_pt2.csv";
pub const HARRIS_VELOCITY_STRUCT_PARAMS_FILE: &str = "harris_pt3.csv";
pub const GAIA_FILE: &str = "GaiaSource.csv";

/// Raw Harris column names
pub const HARRIS_COL_RA: &str = "RA (2000)";
pub const HARRIS_COL_DEC: &str = "DEC";

/// Canonical column names
pub const COL_RA: &str = "ra";
pub const COL_DEC: &str = "dec";
pub const COL_PARALLAX: &str = "parallax";
pub const COL_SOLUTION_ID: &str = "solution_id";
pub const COL_DESIGNATION: &str = "designation";
pub const COL_CARTESIAN: &str = "cartesian";

pub const GAIA_EXPORT_COLUMNS: [&str; 6] = [
    COL_SOLUTION_ID,
    COL_DESIGNATION,
    COL_RA,
    COL_DEC,
    COL_PARALLAX,
    COL_CARTESIAN,
];

/// Cell contents read as missing values
pub const MISSING_TOKENS: [&str; 5] = ["nan", "na", "n/a", "null", "none"];

/// Angle conversion
pub const ANGLE_DECIMAL_PLACES: i32 = 4;
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const MINUTES_PER_UNIT: f64 = 60.0;
pub const SECONDS_PER_UNIT: f64 = 3600.0;

/// Processing defaults
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_SAMPLE_ROWS: usize = 10;
pub const ENV_PREFIX: &str = "CATALOG";

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
