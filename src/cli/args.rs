use crate::models::AngleUnit;
use crate::utils::constants::{COMPRESSION_SNAPPY, DEFAULT_SAMPLE_ROWS};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog-normalizer")]
#[command(about = "Normalizes Harris and Gaia catalogs into decimal-degree tables")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

/// Options shared by every command that builds the tables
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(short, long, help = "Directory holding the raw catalog files [default: ./data]")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Abort on unparseable angles instead of dropping rows")]
    pub strict: bool,

    #[arg(long, value_enum, help = "Unit of the Gaia file's ra/dec columns")]
    pub gaia_angle_unit: Option<AngleUnitArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnitArg {
    Degrees,
    Radians,
}

impl From<AngleUnitArg> for AngleUnit {
    fn from(arg: AngleUnitArg) -> Self {
        match arg {
            AngleUnitArg::Degrees => AngleUnit::Degrees,
            AngleUnitArg::Radians => AngleUnit::Radians,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build all four normalized tables and report row accounting
    Process {
        #[command(flatten)]
        sources: SourceArgs,

        #[arg(long, help = "Write each table to a Parquet file")]
        export: bool,

        #[arg(
            short,
            long,
            help = "Export directory [default: output/catalogs-{YYMMDD}]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(long, default_value = COMPRESSION_SNAPPY)]
        compression: String,
    },

    /// Print sample rows of one normalized table
    Inspect {
        #[command(flatten)]
        sources: SourceArgs,

        #[arg(short, long, help = "Table name, e.g. gaia or harris_ident_pos")]
        table: String,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        sample: usize,
    },

    /// Display information about an exported Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,
    },
}
