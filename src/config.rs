use crate::error::{ProcessingError, Result};
use crate::models::AngleUnit;
use crate::utils::constants::{
    DEFAULT_DATA_DIR, DEFAULT_DELIMITER, ENV_PREFIX, GAIA_FILE, HARRIS_IDENT_POS_FILE,
    HARRIS_METALLICITY_PHOTOMETRY_FILE, HARRIS_VELOCITY_STRUCT_PARAMS_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations of the four raw catalog files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    pub harris_ident_pos: PathBuf,
    pub harris_metallicity_photometry: PathBuf,
    pub harris_velocity_struct_params: PathBuf,
    pub gaia: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            harris_ident_pos: PathBuf::from(HARRIS_IDENT_POS_FILE),
            harris_metallicity_photometry: PathBuf::from(HARRIS_METALLICITY_PHOTOMETRY_FILE),
            harris_velocity_struct_params: PathBuf::from(HARRIS_VELOCITY_STRUCT_PARAMS_FILE),
            gaia: PathBuf::from(GAIA_FILE),
        }
    }
}

/// Pipeline configuration, layered from defaults, an optional TOML file and
/// `CATALOG__*` environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base directory for relative source paths
    pub data_dir: PathBuf,
    pub sources: SourcePaths,
    /// Unit of the Gaia file's numeric ra/dec columns
    pub gaia_angle_unit: AngleUnit,
    /// Abort a source on an unparseable angle instead of dropping the row
    pub strict: bool,
    pub delimiter: char,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            sources: SourcePaths::default(),
            gaia_angle_unit: AngleUnit::Degrees,
            strict: false,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CatalogConfig {
    /// Load configuration; a given `config_file` must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: CatalogConfig = settings.try_deserialize()?;
        config.delimiter_byte()?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_gaia_angle_unit(mut self, unit: AngleUnit) -> Self {
        self.gaia_angle_unit = unit;
        self
    }

    /// Resolve a source path against `data_dir` unless it is absolute
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}
