use crate::error::{ProcessingError, Result};
use crate::models::{CatalogRow, CatalogTable, FieldValue};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads a delimited catalog file with a header row into a `CatalogTable`
pub struct CatalogReader {
    delimiter: u8,
}

impl CatalogReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a catalog file; the table takes `name`
    pub fn read_table(&self, name: &str, path: &Path) -> Result<CatalogTable> {
        let file = File::open(path)?;
        let table = self.read_table_from(name, file)?;
        debug!(
            source = name,
            path = %path.display(),
            rows = table.len(),
            columns = table.columns().len(),
            "read raw catalog"
        );
        Ok(table)
    }

    /// Read a catalog from any reader
    pub fn read_table_from<R: Read>(&self, name: &str, reader: R) -> Result<CatalogTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if columns.iter().all(|c| c.is_empty()) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Catalog '{}' has no header row",
                name
            )));
        }

        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;

            // Short records are padded with missing values
            if record.len() > columns.len() {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Record {} of '{}' has {} fields, header has {}",
                    line + 1,
                    name,
                    record.len(),
                    columns.len()
                )));
            }

            let mut values: Vec<FieldValue> = record.iter().map(FieldValue::from_cell).collect();
            values.resize(columns.len(), FieldValue::Missing);
            rows.push(CatalogRow::new(values));
        }

        Ok(CatalogTable::new(name, columns, rows))
    }
}

impl Default for CatalogReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_harris_positions() -> Result<()> {
        let data = "\
ID,Name,RA (2000),DEC,L,B
NGC 104,47 Tuc,00 24 05.67,-72 04 52.6,305.89,-44.89
NGC 1904,M 79,05 24 11.09,-24 31 29.0,227.23,-29.35
";
        let table = CatalogReader::new().read_table_from("harris_ident_pos", data.as_bytes())?;

        assert_eq!(table.name(), "harris_ident_pos");
        assert_eq!(table.columns(), &["ID", "Name", "RA (2000)", "DEC", "L", "B"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.value(0, "RA (2000)"),
            Some(&FieldValue::Text("00 24 05.67".to_string()))
        );
        assert_eq!(table.value(1, "L"), Some(&FieldValue::Float(227.23)));

        Ok(())
    }

    #[test]
    fn test_short_records_are_padded() -> Result<()> {
        let data = "a,b,c\n1,2\n4,,6\n";
        let table = CatalogReader::new().read_table_from("aux", data.as_bytes())?;

        assert_eq!(table.value(0, "c"), Some(&FieldValue::Missing));
        assert_eq!(table.value(1, "b"), Some(&FieldValue::Missing));
        assert_eq!(table.value(1, "c"), Some(&FieldValue::Integer(6)));

        Ok(())
    }

    #[test]
    fn test_long_records_are_rejected() {
        let data = "a,b\n1,2,3\n";
        let result = CatalogReader::new().read_table_from("aux", data.as_bytes());
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_custom_delimiter() -> Result<()> {
        let data = "ra;dec\n83.6331;22.0145\n";
        let table = CatalogReader::with_delimiter(b';').read_table_from("gaia", data.as_bytes())?;
        assert_eq!(table.value(0, "dec"), Some(&FieldValue::Float(22.0145)));
        Ok(())
    }

    #[test]
    fn test_read_table_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "solution_id,designation,ra,dec,parallax")?;
        writeln!(
            temp_file,
            "1636148068921376768,Gaia DR3 3403818172572314624,83.6331,22.0145,2.0"
        )?;

        let table = CatalogReader::new().read_table("gaia", temp_file.path())?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0, "parallax"), Some(&FieldValue::Float(2.0)));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CatalogReader::new().read_table("gaia", Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
