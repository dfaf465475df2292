use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::{ReportEmitter, ReportTarget};
use crate::config::ReportFormat;
use crate::error::Result;
use crate::types::ReportData;

/// Writes the whole [`ReportData`] as pretty-printed JSON to
/// `<dir>/<repo>_report.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl ReportEmitter for JsonEmitter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn emit(&self, data: &ReportData, target: &ReportTarget, _out: &mut dyn Write) -> Result<PathBuf> {
        let dir = target.ensure_dir()?;
        let path = dir.join(format!("{}_report.json", target.file_stem()));

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, data)?;
        writer.flush()?;

        Ok(path)
    }
}
