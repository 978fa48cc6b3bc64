use crate::config::CatalogConfig;
use crate::error::{PipelineStep, ProcessingError, Result};
use crate::models::{AngleInput, AngleKind, AngleUnit, CatalogRow, CatalogTable, FieldValue};
use crate::processors::report::{NormalizationReport, SourceReport};
use crate::readers::CatalogReader;
use crate::utils::constants::{
    COL_CARTESIAN, COL_DEC, COL_PARALLAX, COL_RA, GAIA_EXPORT_COLUMNS, HARRIS_COL_DEC,
    HARRIS_COL_RA, TABLE_GAIA, TABLE_HARRIS_IDENT_POS, TABLE_HARRIS_METALLICITY_PHOTOMETRY,
    TABLE_HARRIS_VELOCITY_STRUCT_PARAMS,
};
use crate::utils::coordinates::normalize_angle;
use crate::utils::progress::ProgressReporter;
use crate::utils::projection::radec_to_cartesian;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

/// A raw source: its exported table name and the file it is read from
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub name: &'static str,
    pub path: PathBuf,
}

impl SourceSpec {
    pub fn new(name: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
        }
    }

    fn fail(&self, step: PipelineStep, err: ProcessingError) -> ProcessingError {
        err.at_source(self.name, &self.path.display().to_string(), step)
    }
}

/// The four normalized tables, immutable once built
#[derive(Debug, Clone)]
pub struct Catalogs {
    harris_ident_pos: CatalogTable,
    harris_metallicity_photometry: CatalogTable,
    harris_velocity_struct_params: CatalogTable,
    gaia: CatalogTable,
}

impl Catalogs {
    pub fn harris_ident_pos(&self) -> &CatalogTable {
        &self.harris_ident_pos
    }

    pub fn harris_metallicity_photometry(&self) -> &CatalogTable {
        &self.harris_metallicity_photometry
    }

    pub fn harris_velocity_struct_params(&self) -> &CatalogTable {
        &self.harris_velocity_struct_params
    }

    pub fn gaia(&self) -> &CatalogTable {
        &self.gaia
    }

    /// Look up a table by its exported name
    pub fn get(&self, name: &str) -> Option<&CatalogTable> {
        self.iter().find(|table| table.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogTable> {
        [
            &self.harris_ident_pos,
            &self.harris_metallicity_photometry,
            &self.harris_velocity_struct_params,
            &self.gaia,
        ]
        .into_iter()
    }
}

/// Builds the normalized catalog tables from their raw files
pub struct CatalogNormalizer {
    config: CatalogConfig,
    reader: CatalogReader,
}

impl CatalogNormalizer {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let reader = CatalogReader::with_delimiter(config.delimiter_byte()?);
        Ok(Self { config, reader })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build all four tables in sequence. Any source failure aborts the run.
    pub fn build_all(
        &self,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Catalogs, NormalizationReport)> {
        let mut report = NormalizationReport::default();

        let (harris_ident_pos, source) =
            tracked(progress, TABLE_HARRIS_IDENT_POS, || self.build_harris_ident_pos())?;
        report.push(source);

        let (harris_metallicity_photometry, source) =
            tracked(progress, TABLE_HARRIS_METALLICITY_PHOTOMETRY, || {
                self.build_harris_metallicity_photometry()
            })?;
        report.push(source);

        let (harris_velocity_struct_params, source) =
            tracked(progress, TABLE_HARRIS_VELOCITY_STRUCT_PARAMS, || {
                self.build_harris_velocity_struct_params()
            })?;
        report.push(source);

        let (gaia, source) = tracked(progress, TABLE_GAIA, || self.build_gaia())?;
        report.push(source);

        let catalogs = Catalogs {
            harris_ident_pos,
            harris_metallicity_photometry,
            harris_velocity_struct_params,
            gaia,
        };

        info!(
            rows_read = report.total_rows_read(),
            rows_kept = report.total_rows_kept(),
            "normalized all catalogs"
        );

        Ok((catalogs, report))
    }

    pub fn build_harris_ident_pos(&self) -> Result<(CatalogTable, SourceReport)> {
        let spec = self.spec(TABLE_HARRIS_IDENT_POS, &self.config.sources.harris_ident_pos);
        let raw = self.load(&spec)?;
        normalize_harris_ident_pos(raw, &spec, self.config.strict)
    }

    pub fn build_harris_metallicity_photometry(&self) -> Result<(CatalogTable, SourceReport)> {
        let spec = self.spec(
            TABLE_HARRIS_METALLICITY_PHOTOMETRY,
            &self.config.sources.harris_metallicity_photometry,
        );
        let raw = self.load(&spec)?;
        normalize_harris_auxiliary(raw, &spec)
    }

    pub fn build_harris_velocity_struct_params(&self) -> Result<(CatalogTable, SourceReport)> {
        let spec = self.spec(
            TABLE_HARRIS_VELOCITY_STRUCT_PARAMS,
            &self.config.sources.harris_velocity_struct_params,
        );
        let raw = self.load(&spec)?;
        normalize_harris_auxiliary(raw, &spec)
    }

    pub fn build_gaia(&self) -> Result<(CatalogTable, SourceReport)> {
        let spec = self.spec(TABLE_GAIA, &self.config.sources.gaia);
        let raw = self.load(&spec)?;
        normalize_gaia(raw, &spec, self.config.gaia_angle_unit, self.config.strict)
    }

    fn spec(&self, name: &'static str, path: &Path) -> SourceSpec {
        SourceSpec::new(name, self.config.resolve(path))
    }

    fn load(&self, spec: &SourceSpec) -> Result<CatalogTable> {
        self.reader
            .read_table(spec.name, &spec.path)
            .map_err(|e| spec.fail(PipelineStep::Load, e))
    }
}

/// Harris identity/position table: rename to the canonical ra/dec columns,
/// convert sexagesimal angles, drop rows without a position
pub fn normalize_harris_ident_pos(
    mut table: CatalogTable,
    spec: &SourceSpec,
    strict: bool,
) -> Result<(CatalogTable, SourceReport)> {
    let _span = info_span!("normalize", source = spec.name).entered();
    let mut report = start_report(&table, spec);

    table
        .rename_columns(&[(HARRIS_COL_RA, COL_RA), (HARRIS_COL_DEC, COL_DEC)])
        .map_err(|e| spec.fail(PipelineStep::Rename, e))?;

    let unparseable = convert_angles(&mut table, spec, AngleUnit::Degrees, strict)?;
    prune(&mut table, Some(&[COL_RA, COL_DEC][..]), &unparseable, &mut report, spec)?;

    finish_report(&table, &mut report);
    Ok((table, report))
}

/// Harris metallicity/photometry and velocity/structure tables: pass-through
/// columns, rows with any missing value dropped
pub fn normalize_harris_auxiliary(
    mut table: CatalogTable,
    spec: &SourceSpec,
) -> Result<(CatalogTable, SourceReport)> {
    let _span = info_span!("normalize", source = spec.name).entered();
    let mut report = start_report(&table, spec);

    prune(&mut table, None, &HashSet::new(), &mut report, spec)?;

    finish_report(&table, &mut report);
    Ok((table, report))
}

/// Gaia table: normalize angles, add the parallax-scaled cartesian column,
/// drop rows without a position, restrict to the export columns
pub fn normalize_gaia(
    mut table: CatalogTable,
    spec: &SourceSpec,
    unit: AngleUnit,
    strict: bool,
) -> Result<(CatalogTable, SourceReport)> {
    let _span = info_span!("normalize", source = spec.name).entered();
    let mut report = start_report(&table, spec);

    let unparseable = convert_angles(&mut table, spec, unit, strict)?;
    add_cartesian(&mut table, spec)?;
    prune(&mut table, Some(&[COL_RA, COL_DEC][..]), &unparseable, &mut report, spec)?;

    let table = table
        .select(&GAIA_EXPORT_COLUMNS)
        .map_err(|e| spec.fail(PipelineStep::ColumnSelection, e))?;

    finish_report(&table, &mut report);
    Ok((table, report))
}

fn tracked<T>(
    progress: Option<&ProgressReporter>,
    source_name: &str,
    build: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if let Some(p) = progress {
        p.start_source(source_name);
    }
    let built = build()?;
    if let Some(p) = progress {
        p.finish_source();
    }
    Ok(built)
}

fn start_report(table: &CatalogTable, spec: &SourceSpec) -> SourceReport {
    SourceReport {
        rows_read: table.len(),
        ..SourceReport::new(spec.name, spec.path.clone())
    }
}

fn finish_report(table: &CatalogTable, report: &mut SourceReport) {
    report.rows_kept = table.len();
    report.columns = table.columns().to_vec();

    if report.dropped_unparseable > 0 {
        warn!(
            source = %report.source_name,
            rows = report.dropped_unparseable,
            "dropped rows with unparseable angles"
        );
    }
    info!(
        source = %report.source_name,
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        dropped_missing = report.dropped_missing,
        "normalized catalog"
    );
}

/// Replace ra/dec with rounded decimal degrees. Unparseable angles become
/// missing (or abort the source when `strict`); returns the affected rows.
fn convert_angles(
    table: &mut CatalogTable,
    spec: &SourceSpec,
    unit: AngleUnit,
    strict: bool,
) -> Result<HashSet<usize>> {
    let columns = [
        (
            table
                .require_column(COL_RA)
                .map_err(|e| spec.fail(PipelineStep::AngleConversion, e))?,
            AngleKind::RightAscension,
        ),
        (
            table
                .require_column(COL_DEC)
                .map_err(|e| spec.fail(PipelineStep::AngleConversion, e))?,
            AngleKind::Declination,
        ),
    ];

    let mut unparseable = HashSet::new();
    for (row_index, row) in table.rows_mut().iter_mut().enumerate() {
        for &(column, kind) in &columns {
            let degrees = match row.get(column) {
                Some(field) => AngleInput::from_field(field, unit),
                None => Ok(None),
            }
            .and_then(|input| {
                input
                    .map(|input| normalize_angle(&input, kind))
                    .transpose()
            });

            let converted = match degrees {
                Ok(Some(degrees)) => FieldValue::Float(degrees),
                Ok(None) => FieldValue::Missing,
                Err(err) if strict || !err.is_row_level() => {
                    let err = ProcessingError::InvalidAngle(format!(
                        "row {}, column '{}': {}",
                        row_index + 1,
                        kind.column(),
                        err
                    ));
                    return Err(spec.fail(PipelineStep::AngleConversion, err));
                }
                Err(err) => {
                    debug!(
                        row = row_index + 1,
                        column = kind.column(),
                        error = %err,
                        "unparseable angle"
                    );
                    unparseable.insert(row_index);
                    FieldValue::Missing
                }
            };
            row.set(column, converted);
        }
    }

    Ok(unparseable)
}

/// Append the cartesian column; rows lacking a numeric ra, dec or parallax
/// get a missing triple
fn add_cartesian(table: &mut CatalogTable, spec: &SourceSpec) -> Result<()> {
    let parallax = table
        .require_column(COL_PARALLAX)
        .map_err(|e| spec.fail(PipelineStep::Projection, e))?;
    let ra = table
        .require_column(COL_RA)
        .map_err(|e| spec.fail(PipelineStep::Projection, e))?;
    let dec = table
        .require_column(COL_DEC)
        .map_err(|e| spec.fail(PipelineStep::Projection, e))?;

    let numeric = |row: &CatalogRow, index: usize| {
        row.get(index).and_then(FieldValue::as_f64)
    };

    table.add_column(COL_CARTESIAN, |row| {
        match (numeric(row, ra), numeric(row, dec), numeric(row, parallax)) {
            (Some(ra_deg), Some(dec_deg), Some(plx)) => {
                FieldValue::Cartesian(radec_to_cartesian(ra_deg, dec_deg, plx))
            }
            _ => FieldValue::Missing,
        }
    });

    Ok(())
}

fn prune(
    table: &mut CatalogTable,
    subset: Option<&[&str]>,
    unparseable: &HashSet<usize>,
    report: &mut SourceReport,
    spec: &SourceSpec,
) -> Result<()> {
    let dropped = table
        .drop_missing(subset)
        .map_err(|e| spec.fail(PipelineStep::ColumnSelection, e))?;

    for (position, column) in dropped {
        if unparseable.contains(&position) {
            report.dropped_unparseable += 1;
        } else {
            let err = ProcessingError::MissingValue {
                column,
                row: position + 1,
            };
            debug!(error = %err, "dropped row");
            report.dropped_missing += 1;
        }
    }

    Ok(())
}
