use crate::types::score::CanonicalField;
use crate::types::summary::ResultsReport;

/// One row per ranked house, every field quoted.
pub fn to_csv(report: &ResultsReport) -> String {
    let mut header = vec!["House".to_string()];
    header.extend(CanonicalField::CRITERIA.iter().map(|field| field.label().to_string()));
    header.push("Total".to_string());
    header.push("Rank".to_string());

    let mut rows = vec![header];
    for summary in &report.summaries {
        let mut row = vec![summary.house.clone()];
        row.extend(summary.average.criteria().iter().map(|value| format!("{value:.2}")));
        row.push(format!("{:.2}", summary.total()));
        row.push(summary.rank.to_string());
        rows.push(row);
    }

    let mut output = rows
        .iter()
        .map(|row| row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n");
    output.push('\n');
    output
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.trim().replace('"', "\"\""))
}
