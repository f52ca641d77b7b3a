pub mod steps;

use encoding_rs::Encoding;
use metrics::{counter, histogram};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, instrument};

use crate::config::{ConfigOverrides, ConverterConfig};
use crate::error::{ConvertError, Result};
use crate::statistics::{collect_statistics, OutputStatistics};
use crate::types::{CleanRow, ComponentRecord, Table, WorkbookKind};
use steps::{CleanedRows, ShapedRecords};

/// Counts from a successful conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub rows_loaded: usize,
    pub rows_dropped_missing: usize,
    pub records_skipped_blank: usize,
    pub records_written: usize,
    pub bytes_written: u64,
    pub output_path: PathBuf,
}

/// Spreadsheet to JSON converter. Runs the steps in order and stops at the
/// first failure.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    encoding: &'static Encoding,
}

impl Converter {
    /// Fails with a configuration error before any I/O happens
    pub fn new(config: ConverterConfig) -> Result<Self> {
        let encoding = config.validate()?;
        Ok(Self { config, encoding })
    }

    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Self::new(ConverterConfig::resolve(overrides)?)
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn validate_paths(&self) -> Result<WorkbookKind> {
        steps::validate_paths(&self.config.source_path, &self.config.output_path)
    }

    pub fn load_table(&self, kind: WorkbookKind) -> Result<Table> {
        steps::load_table(&self.config.source_path, &self.config.sheet_name, kind)
    }

    pub fn validate_rows(&self, table: &Table) -> Result<CleanedRows> {
        steps::validate_rows(table, &self.config.required_fields)
    }

    pub fn shape_records(&self, rows: Vec<CleanRow>) -> ShapedRecords {
        steps::shape_records(rows)
    }

    pub fn write_output(&self, records: &[ComponentRecord]) -> Result<u64> {
        steps::write_output(records, &self.config.output_path, self.encoding)
    }

    /// Run every step and report the counts
    #[instrument(skip(self), fields(source = %self.config.source_path.display()))]
    pub fn run(&self) -> Result<ConversionReport> {
        info!("🚀 Starting spreadsheet to JSON conversion...");
        let started = std::time::Instant::now();

        let kind = self.validate_paths()?;
        let table = self.load_table(kind)?;
        let rows_loaded = table.len();
        counter!("studio_rows_loaded_total").increment(rows_loaded as u64);

        let cleaned = self.validate_rows(&table)?;
        drop(table);
        counter!("studio_rows_dropped_total").increment(cleaned.dropped as u64);

        let shaped = self.shape_records(cleaned.rows);
        counter!("studio_records_skipped_total").increment(shaped.skipped as u64);

        if shaped.records.is_empty() {
            return Err(ConvertError::NoRecords);
        }

        let bytes_written = self.write_output(&shaped.records)?;
        counter!("studio_records_written_total").increment(shaped.records.len() as u64);
        histogram!("studio_conversion_duration_seconds").record(started.elapsed().as_secs_f64());

        info!("✅ Conversion completed successfully!");
        Ok(ConversionReport {
            rows_loaded,
            rows_dropped_missing: cleaned.dropped,
            records_skipped_blank: shaped.skipped,
            records_written: shaped.records.len(),
            bytes_written,
            output_path: self.config.output_path.clone(),
        })
    }

    /// Boolean form of `run`: any error is logged and becomes `false`
    pub fn convert(&self) -> bool {
        match self.run() {
            Ok(_) => true,
            Err(e) => {
                error!("❌ Conversion failed: {}", e);
                false
            }
        }
    }

    /// Read the output file back. Independent of `convert`.
    pub fn get_statistics(&self) -> Option<OutputStatistics> {
        collect_statistics(&self.config.output_path, self.encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_bad_config_before_io() {
        let config = ConverterConfig {
            source_path: PathBuf::from("/definitely/not/here.xlsx"),
            sheet_name: String::new(),
            ..Default::default()
        };
        assert!(matches!(Converter::new(config), Err(ConvertError::Config(_))));
    }

    #[test]
    fn missing_source_makes_convert_false() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Converter::with_overrides(ConfigOverrides {
            source_path: Some(dir.path().join("absent.xlsx")),
            output_path: Some(dir.path().join("components.json")),
            ..Default::default()
        })
        .unwrap();

        assert!(matches!(converter.run(), Err(ConvertError::NotFound(_))));
        assert!(!converter.convert());
        assert!(converter.get_statistics().is_none());
    }
}
