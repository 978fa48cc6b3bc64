use crate::cli::args::{Cli, Commands, SourceArgs};
use crate::config::CatalogConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{CatalogTable, FieldValue};
use crate::processors::{CatalogNormalizer, Catalogs, NormalizationReport};
use crate::utils::constants::{COL_DEC, COL_RA, TABLE_NAMES};
use crate::utils::coordinates::{decimal_to_dms, decimal_to_hms};
use crate::utils::filename::{generate_default_export_dir, table_parquet_path};
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            sources,
            export,
            output_dir,
            compression,
        } => {
            let (catalogs, report) = build_catalogs(&sources)?;

            println!("\n{}", report.summary());
            print_schema_alignment(&catalogs);

            if !export {
                return Ok(());
            }

            let writer = ParquetWriter::new().with_compression(&compression)?;
            let output_dir = output_dir.unwrap_or_else(generate_default_export_dir);
            std::fs::create_dir_all(&output_dir)?;

            for table in catalogs.iter() {
                let path = table_parquet_path(&output_dir, table.name());
                writer.write_table(table, &path)?;
                info!(
                    table = table.name(),
                    path = %path.display(),
                    rows = table.len(),
                    "exported table"
                );
                println!("Wrote {} rows to {}", table.len(), path.display());
            }

            println!("Export complete!");
        }

        Commands::Inspect {
            sources,
            table,
            sample,
        } => {
            let (catalogs, _) = build_catalogs(&sources)?;
            let selected = catalogs.get(&table).ok_or_else(|| {
                ProcessingError::UnknownTable(format!(
                    "'{}' (expected one of: {})",
                    table,
                    TABLE_NAMES.join(", ")
                ))
            })?;

            println!("{}", render_sample(selected, sample));
        }

        Commands::Info { file } => {
            println!("Analyzing Parquet file: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());
        }
    }

    Ok(())
}

/// Resolve configuration from file, environment and flags, then build every table
fn build_catalogs(args: &SourceArgs) -> Result<(Catalogs, NormalizationReport)> {
    let mut config = CatalogConfig::load(args.config.as_deref())?;

    if let Some(ref data_dir) = args.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if args.strict {
        config = config.with_strict(true);
    }
    if let Some(unit) = args.gaia_angle_unit {
        config = config.with_gaia_angle_unit(unit.into());
    }

    info!(data_dir = %config.data_dir.display(), strict = config.strict, "building catalogs");

    let progress = ProgressReporter::new(TABLE_NAMES.len() as u64, "normalizing catalogs", false);
    let normalizer = CatalogNormalizer::new(config)?;
    let built = normalizer.build_all(Some(&progress))?;
    progress.finish_with_message("catalogs ready");

    Ok(built)
}

fn print_schema_alignment(catalogs: &Catalogs) {
    let shared = catalogs.harris_ident_pos().shared_columns(catalogs.gaia());
    println!(
        "Columns shared by {} and {}: {}",
        catalogs.harris_ident_pos().name(),
        catalogs.gaia().name(),
        shared.join(", ")
    );
}

/// Render up to `sample` rows; ra/dec are also shown in sexagesimal form
pub fn render_sample(table: &CatalogTable, sample: usize) -> String {
    let mut out = format!(
        "{}: {} rows, columns [{}]\n",
        table.name(),
        table.len(),
        table.columns().join(", ")
    );

    for (index, row) in table.rows().iter().take(sample).enumerate() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .zip(row.values())
            .map(|(column, value)| format!("{}={}", column, value))
            .collect();
        out.push_str(&format!("{}. {}", index + 1, cells.join(", ")));

        let ra = table.value(index, COL_RA).and_then(FieldValue::as_f64);
        let dec = table.value(index, COL_DEC).and_then(FieldValue::as_f64);
        if let (Some(ra), Some(dec)) = (ra, dec) {
            out.push_str(&format!(
                " [{} {}]",
                decimal_to_hms(ra),
                decimal_to_dms(dec)
            ));
        }
        out.push('\n');
    }

    out
}
