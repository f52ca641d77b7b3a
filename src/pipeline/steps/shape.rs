use tracing::{info, instrument, warn};

use crate::types::{CleanRow, ComponentRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapedRecords {
    pub records: Vec<ComponentRecord>,
    /// Records skipped because Title or HTML was blank after trimming
    pub skipped: usize,
}

/// Turn cleaned rows into component records, skipping any whose Title or
/// HTML is empty.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn shape_records(rows: Vec<CleanRow>) -> ShapedRecords {
    info!("🔧 Converting rows to component records...");

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        let record = ComponentRecord::from(row);
        if record.title.is_empty() || record.html.is_empty() {
            warn!("Skipping component with missing Title or HTML: {:?}", record.title);
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    if skipped > 0 {
        warn!("Skipped {} components with blank Title or HTML", skipped);
    }
    info!("✅ Converted {} components", records.len());

    ShapedRecords { records, skipped }
}
