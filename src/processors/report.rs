use std::path::PathBuf;

/// Row accounting for one normalized source
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceReport {
    pub source_name: String,
    pub path: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_missing: usize,
    pub dropped_unparseable: usize,
    pub columns: Vec<String>,
}

impl SourceReport {
    pub fn new(source_name: &str, path: PathBuf) -> Self {
        Self {
            source_name: source_name.to_string(),
            path,
            ..Self::default()
        }
    }

    pub fn rows_dropped(&self) -> usize {
        self.dropped_missing + self.dropped_unparseable
    }
}

/// Row accounting across all sources
#[derive(Debug, Clone, Default)]
pub struct NormalizationReport {
    pub sources: Vec<SourceReport>,
}

impl NormalizationReport {
    pub fn push(&mut self, report: SourceReport) {
        self.sources.push(report);
    }

    pub fn source(&self, name: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.source_name == name)
    }

    pub fn total_rows_read(&self) -> usize {
        self.sources.iter().map(|s| s.rows_read).sum()
    }

    pub fn total_rows_kept(&self) -> usize {
        self.sources.iter().map(|s| s.rows_kept).sum()
    }

    pub fn total_rows_dropped(&self) -> usize {
        self.sources.iter().map(SourceReport::rows_dropped).sum()
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Catalog Normalization Report ===\n");
        for source in &self.sources {
            let kept_pct = if source.rows_read == 0 {
                100.0
            } else {
                100.0 * source.rows_kept as f64 / source.rows_read as f64
            };
            summary.push_str(&format!(
                "{} ({})\n",
                source.source_name,
                source.path.display()
            ));
            summary.push_str(&format!(
                "  Rows: {} read, {} kept ({:.1}%)\n",
                source.rows_read, source.rows_kept, kept_pct
            ));
            summary.push_str(&format!(
                "  Dropped: {} missing values, {} unparseable angles\n",
                source.dropped_missing, source.dropped_unparseable
            ));
            summary.push_str(&format!("  Columns: {}\n", source.columns.join(", ")));
        }
        summary.push_str(&format!(
            "\nTotal: {} read, {} kept, {} dropped\n",
            self.total_rows_read(),
            self.total_rows_kept(),
            self.total_rows_dropped()
        ));

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, read: usize, missing: usize, unparseable: usize) -> SourceReport {
        SourceReport {
            rows_read: read,
            rows_kept: read - missing - unparseable,
            dropped_missing: missing,
            dropped_unparseable: unparseable,
            columns: vec!["ra".to_string(), "dec".to_string()],
            ..SourceReport::new(name, PathBuf::from(format!("data/{}.csv", name)))
        }
    }

    #[test]
    fn test_totals() {
        let mut report = NormalizationReport::default();
        report.push(source("harris_ident_pos", 10, 2, 1));
        report.push(source("gaia", 5, 0, 0));

        assert_eq!(report.total_rows_read(), 15);
        assert_eq!(report.total_rows_kept(), 12);
        assert_eq!(report.total_rows_dropped(), 3);
        assert_eq!(report.source("gaia").map(|s| s.rows_kept), Some(5));
        assert!(report.source("unknown").is_none());
    }

    #[test]
    fn test_summary_mentions_every_source() {
        let mut report = NormalizationReport::default();
        report.push(source("harris_ident_pos", 4, 1, 0));
        report.push(source("gaia", 0, 0, 0));

        let summary = report.summary();
        assert!(summary.contains("harris_ident_pos (data/harris_ident_pos.csv)"));
        assert!(summary.contains("Rows: 4 read, 3 kept (75.0%)"));
        assert!(summary.contains("Rows: 0 read, 0 kept (100.0%)"));
        assert!(summary.contains("Total: 4 read, 3 kept, 1 dropped"));
    }
}
