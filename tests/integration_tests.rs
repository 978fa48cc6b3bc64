use catalog_normalizer::models::{AngleUnit, FieldValue};
use catalog_normalizer::utils::constants::{GAIA_EXPORT_COLUMNS, TABLE_NAMES};
use catalog_normalizer::utils::table_parquet_path;
use catalog_normalizer::writers::ParquetWriter;
use catalog_normalizer::{CatalogConfig, CatalogNormalizer, PipelineStep, ProcessingError};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HARRIS_PT1: &str = "\
ID,Name,RA (2000),DEC,L,B,R_Sun,R_gc,X,Y,Z
NGC 1952,Crab,05 34 31.94,+22 00 52.2,184.56,-5.78,2.0,10.0,1.0,1.0,1.0
NGC 104,47 Tuc,00 24 05.67,-72 04 52.6,305.89,-44.89,4.5,7.4,1.8,-2.6,-3.1
Pal 99,,,,1.0,2.0,3.0,4.0,5.0,6.0,7.0
Ter 99,,12 00,+01 00 00,1.0,2.0,3.0,4.0,5.0,6.0,7.0
";

const HARRIS_PT2: &str = "\
ID,[Fe/H],wt,E(B-V),V_HB,(m-M)V,V_t,M_V,U-B,B-V
NGC 104,-0.72,10,0.04,14.06,13.37,3.95,-9.42,0.37,0.88
NGC 288,-1.32,3,0.03,15.44,14.84,8.09,-6.75,,0.65
";

const HARRIS_PT3: &str = "\
ID,v_r,+/-,v_LSR,sig_v,+/-,c,r_c,r_h,mu_V
NGC 104,-18.0,0.1,-26.7,11.0,0.3,2.07,0.36,3.17,14.38
NGC 288,-45.4,0.2,-51.9,2.9,0.3,0.99,1.35,2.23,19.95
NGC 362,223.5,0.5,214.1,6.4,0.3,1.76,0.18,0.82,14.88
";

const GAIA: &str = "\
solution_id,designation,source_id,random_index,ra,ra_error,dec,dec_error,parallax,pmra
1636148068921376768,Gaia DR3 3403818172572314624,3403818172572314624,1,83.6331,0.01,22.0145,0.01,2.0,1.1
1636148068921376768,Gaia DR3 4689637789368594944,4689637789368594944,2,6.0236,0.02,-72.0813,0.02,0.22,5.2
1636148068921376768,Gaia DR3 1,1,3,,0.02,10.0,0.02,0.5,0.1
";

fn write_sources(dir: &Path) {
    fs::write(dir.join("harris_pt1.csv"), HARRIS_PT1).unwrap();
    fs::write(dir.join("harris_pt2.csv"), HARRIS_PT2).unwrap();
    fs::write(dir.join("harris_pt3.csv"), HARRIS_PT3).unwrap();
    fs::write(dir.join("GaiaSource.csv"), GAIA).unwrap();
}

fn normalizer_for(dir: &Path) -> CatalogNormalizer {
    CatalogNormalizer::new(CatalogConfig::default().with_data_dir(dir)).unwrap()
}

#[test]
fn test_end_to_end_harris_positions() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_sources(temp_dir.path());

    let (catalogs, report) = normalizer_for(temp_dir.path()).build_all(None).unwrap();
    let harris = catalogs.harris_ident_pos();

    assert_eq!(harris.len(), 2);
    assert!(harris.has_column("ra") && harris.has_column("dec"));
    assert!(!harris.has_column("RA (2000)"));

    let ra = harris.value(0, "ra").and_then(FieldValue::as_f64).unwrap();
    let dec = harris.value(0, "dec").and_then(FieldValue::as_f64).unwrap();
    assert!((ra - 83.6331).abs() < 1e-9);
    assert!((dec - 22.0145).abs() < 1e-9);

    let source = report.source("harris_ident_pos").unwrap();
    assert_eq!(source.rows_read, 4);
    assert_eq!(source.dropped_missing, 1);
    assert_eq!(source.dropped_unparseable, 1);
}

#[test]
fn test_positional_tables_have_no_missing_angles() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());

    let (catalogs, _) = normalizer_for(temp_dir.path()).build_all(None).unwrap();

    for table in [catalogs.harris_ident_pos(), catalogs.gaia()] {
        for column in ["ra", "dec"] {
            let values: Vec<&FieldValue> = table.column_values(column).unwrap().collect();
            assert_eq!(values.len(), table.len());
            assert!(
                values.iter().all(|v| v.as_f64().map_or(false, f64::is_finite)),
                "{}.{} has a missing or non-finite value",
                table.name(),
                column
            );
        }
    }
}

#[test]
fn test_gaia_export_schema_and_cartesian() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());

    let (catalogs, _) = normalizer_for(temp_dir.path()).build_all(None).unwrap();
    let gaia = catalogs.gaia();

    assert_eq!(gaia.columns(), &GAIA_EXPORT_COLUMNS);
    assert_eq!(gaia.len(), 2);

    for row in 0..gaia.len() {
        let parallax = gaia.value(row, "parallax").and_then(FieldValue::as_f64).unwrap();
        let t = gaia.value(row, "cartesian").and_then(FieldValue::as_cartesian).unwrap();
        let sum = t.x * t.x + t.y * t.y + t.z * t.z;
        assert!((sum - parallax * parallax).abs() < 1e-9);
    }
}

#[test]
fn test_auxiliary_tables_pass_through() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());

    let (catalogs, _) = normalizer_for(temp_dir.path()).build_all(None).unwrap();

    let metallicity = catalogs.harris_metallicity_photometry();
    assert_eq!(metallicity.len(), 1);
    assert_eq!(metallicity.columns().len(), 10);
    assert_eq!(metallicity.value(0, "[Fe/H]"), Some(&FieldValue::Float(-0.72)));

    let velocity = catalogs.harris_velocity_struct_params();
    assert_eq!(velocity.len(), 3);
    assert!(!velocity.has_column("ra"));
}

#[test]
fn test_tables_exported_by_stable_name() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());

    let (catalogs, report) = normalizer_for(temp_dir.path()).build_all(None).unwrap();

    for name in TABLE_NAMES {
        assert_eq!(catalogs.get(name).map(|t| t.name()), Some(name));
        assert!(report.source(name).is_some());
    }
}

#[test]
fn test_missing_source_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());
    fs::remove_file(temp_dir.path().join("GaiaSource.csv")).unwrap();

    let err = normalizer_for(temp_dir.path()).build_all(None).unwrap_err();

    match &err {
        ProcessingError::SourceLoad {
            source_name, step, ..
        } => {
            assert_eq!(source_name, "gaia");
            assert_eq!(*step, PipelineStep::Load);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("GaiaSource.csv"));
}

#[test]
fn test_strict_mode_rejects_unparseable_angles() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());

    let config = CatalogConfig::default()
        .with_data_dir(temp_dir.path())
        .with_strict(true);
    let err = CatalogNormalizer::new(config)
        .unwrap()
        .build_all(None)
        .unwrap_err();

    assert!(matches!(
        err,
        ProcessingError::SourceLoad {
            step: PipelineStep::AngleConversion,
            ..
        }
    ));
    assert!(err.to_string().contains("harris_ident_pos"));
}

#[test]
fn test_gaia_radian_source() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());
    fs::write(
        temp_dir.path().join("GaiaSource.csv"),
        "solution_id,designation,ra,dec,parallax\n1,Gaia DR3 1,1.5707963267948966,0.0,1.0\n",
    )
    .unwrap();

    let config = CatalogConfig::default()
        .with_data_dir(temp_dir.path())
        .with_gaia_angle_unit(AngleUnit::Radians);
    let (catalogs, _) = CatalogNormalizer::new(config).unwrap().build_all(None).unwrap();

    assert_eq!(catalogs.gaia().value(0, "ra"), Some(&FieldValue::Float(90.0)));
    let t = catalogs
        .gaia()
        .value(0, "cartesian")
        .and_then(FieldValue::as_cartesian)
        .unwrap();
    assert!(t.x.abs() < 1e-9 && (t.y - 1.0).abs() < 1e-9);
}

#[test]
fn test_export_to_parquet() {
    let temp_dir = TempDir::new().unwrap();
    write_sources(temp_dir.path());
    let out_dir = temp_dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    let (catalogs, _) = normalizer_for(temp_dir.path()).build_all(None).unwrap();
    let writer = ParquetWriter::new();

    for table in catalogs.iter() {
        writer
            .write_table(table, &table_parquet_path(&out_dir, table.name()))
            .unwrap();
    }

    let gaia_path = table_parquet_path(&out_dir, "gaia");
    let info = writer.get_file_info(&gaia_path).unwrap();
    assert_eq!(info.total_rows, 2);

    let schema = writer.read_schema(&gaia_path).unwrap();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, GAIA_EXPORT_COLUMNS);
}
