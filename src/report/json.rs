use crate::types::summary::ResultsReport;

pub fn to_json(report: &ResultsReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
