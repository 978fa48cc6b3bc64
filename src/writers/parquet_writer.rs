use crate::error::{ProcessingError, Result};
use crate::models::{CatalogTable, FieldValue};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::{
    ArrayRef, FixedSizeListBuilder, Float64Builder, Int64Builder, StringBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

const CARTESIAN_WIDTH: i32 = 3;

/// Arrow column type inferred from a table column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int64,
    Float64,
    Utf8,
    Cartesian,
}

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    /// Write a normalized catalog table to a Parquet file
    pub fn write_table(&self, table: &CatalogTable, path: &Path) -> Result<()> {
        let kinds = infer_column_kinds(table);
        let schema = create_schema(table, &kinds);
        let batch = table_to_batch(table, &kinds, schema.clone())?;

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(())
    }

    /// Arrow schema stored in a Parquet file
    pub fn read_schema(&self, path: &Path) -> Result<SchemaRef> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        Ok(builder.schema().clone())
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let columns = file_metadata
            .schema_descr()
            .root_schema()
            .get_fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            columns,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn infer_column_kinds(table: &CatalogTable) -> Vec<ColumnKind> {
    (0..table.columns().len())
        .map(|index| {
            let mut kind: Option<ColumnKind> = None;
            for row in table.rows() {
                let next = match row.get(index) {
                    Some(FieldValue::Cartesian(_)) => ColumnKind::Cartesian,
                    Some(FieldValue::Text(_)) => ColumnKind::Utf8,
                    Some(FieldValue::Float(_)) => ColumnKind::Float64,
                    Some(FieldValue::Integer(_)) => ColumnKind::Int64,
                    Some(FieldValue::Missing) | None => continue,
                };
                kind = Some(match (kind, next) {
                    (None, next) => next,
                    (Some(current), next) if current == next => current,
                    (Some(ColumnKind::Int64), ColumnKind::Float64)
                    | (Some(ColumnKind::Float64), ColumnKind::Int64) => ColumnKind::Float64,
                    _ => ColumnKind::Utf8,
                });
            }
            kind.unwrap_or(ColumnKind::Utf8)
        })
        .collect()
}

fn cartesian_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float64, true))
}

fn create_schema(table: &CatalogTable, kinds: &[ColumnKind]) -> SchemaRef {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .zip(kinds)
        .map(|(name, kind)| {
            let data_type = match kind {
                ColumnKind::Int64 => DataType::Int64,
                ColumnKind::Float64 => DataType::Float64,
                ColumnKind::Utf8 => DataType::Utf8,
                ColumnKind::Cartesian => {
                    DataType::FixedSizeList(cartesian_item_field(), CARTESIAN_WIDTH)
                }
            };
            Field::new(name, data_type, true)
        })
        .collect();

    Arc::new(Schema::new(fields))
}

fn table_to_batch(
    table: &CatalogTable,
    kinds: &[ColumnKind],
    schema: SchemaRef,
) -> Result<RecordBatch> {
    let num_rows = table.len();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(kinds.len());

    for (index, kind) in kinds.iter().enumerate() {
        let values = table.rows().iter().map(|row| row.get(index));

        let array: ArrayRef = match kind {
            ColumnKind::Int64 => {
                let mut builder = Int64Builder::with_capacity(num_rows);
                for value in values {
                    match value {
                        Some(FieldValue::Integer(v)) => builder.append_value(*v),
                        _ => builder.append_null(),
                    }
                }
                Arc::new(builder.finish())
            }
            ColumnKind::Float64 => {
                let mut builder = Float64Builder::with_capacity(num_rows);
                for value in values {
                    builder.append_option(value.and_then(FieldValue::as_f64));
                }
                Arc::new(builder.finish())
            }
            ColumnKind::Utf8 => {
                let mut builder = StringBuilder::with_capacity(num_rows, num_rows * 16);
                for value in values {
                    match value {
                        Some(FieldValue::Missing) | None => builder.append_null(),
                        Some(field) => builder.append_value(field.to_string()),
                    }
                }
                Arc::new(builder.finish())
            }
            ColumnKind::Cartesian => {
                let mut builder = FixedSizeListBuilder::new(
                    Float64Builder::with_capacity(num_rows * CARTESIAN_WIDTH as usize),
                    CARTESIAN_WIDTH,
                )
                .with_field(cartesian_item_field());
                for value in values {
                    match value.and_then(FieldValue::as_cartesian) {
                        Some(triple) => {
                            builder.values().append_slice(&triple.as_array());
                            builder.append(true);
                        }
                        None => {
                            builder.values().append_nulls(CARTESIAN_WIDTH as usize);
                            builder.append(false);
                        }
                    }
                }
                Arc::new(builder.finish())
            }
        };

        columns.push(array);
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub columns: Vec<String>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - Columns: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.columns.join(", "),
            self.file_size as f64 / 1024.0,
            self.compression,
        )
    }
}
