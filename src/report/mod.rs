pub mod csv;
pub mod json;
pub mod md;

use crate::error::MarksError;
use crate::types::summary::ResultsReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Csv,
}

pub fn render(report: &ResultsReport, format: OutputFormat) -> Result<String, MarksError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(MarksError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
        OutputFormat::Csv => Ok(csv::to_csv(report)),
    }
}
