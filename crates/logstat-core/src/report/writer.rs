use super::{TABLE_PLACEHOLDER, Template};
use crate::Result;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders the report template and writes it atomically
pub struct ReportWriter {
    template_path: PathBuf,
}

impl ReportWriter {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    /// Render `table_json` into the template and move the result to `report_path`.
    ///
    /// The content goes to a temporary file in the report's directory first and is then
    /// renamed over `report_path`, so readers never see a partially written report.
    pub fn write(&self, table_json: &str, report_path: &Path) -> Result<()> {
        let template = Template::from_file(&self.template_path)?;
        let content = template.safe_substitute(&HashMap::from([(TABLE_PLACEHOLDER, table_json)]));

        let dir = match report_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".report-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tracing::info!("Writing temporary report {}", tmp.path().display());

        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;

        tracing::info!(
            "Moving {} to {}",
            tmp.path().display(),
            report_path.display()
        );
        tmp.persist(report_path).map_err(|e| e.error)?;

        Ok(())
    }
}
