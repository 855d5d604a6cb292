use crate::types::score::{CanonicalField, ScoreEntry};
use crate::types::summary::ResultsReport;

pub const NO_SCORES: &str = "No scores submitted yet.";

pub fn to_markdown(report: &ResultsReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# {} Results ({})\n\n",
        report.event, report.category
    ));

    for failure in &report.failures {
        output.push_str(&format!(
            "> warning: collection `{}` could not be read: {}\n",
            failure.collection, failure.message
        ));
    }
    if !report.failures.is_empty() {
        output.push('\n');
    }

    let winner = report
        .winner
        .as_ref()
        .and_then(|house| report.summaries.iter().find(|s| &s.house == house));
    let Some(winner) = winner else {
        output.push_str(NO_SCORES);
        output.push('\n');
        return output;
    };

    output.push_str(&format!(
        "Winner: **{}** with **{:.2}** average points!\n\n",
        winner.house,
        winner.total()
    ));
    output.push_str(&format!(
        "Showing results from {} submission(s).\n\n",
        report.submissions
    ));

    let labels: Vec<_> = CanonicalField::CRITERIA.iter().map(|f| f.label()).collect();
    output.push_str(&format!("| House | {} | Total | Rank |\n", labels.join(" | ")));
    output.push_str(&format!("|{}\n", "---|".repeat(labels.len() + 3)));
    for summary in &report.summaries {
        let values: Vec<_> = summary
            .average
            .criteria()
            .iter()
            .map(|value| format!("{value:.2}"))
            .collect();
        output.push_str(&format!(
            "| {} | {} | **{:.2}** | {} |\n",
            escape_cell(&summary.house),
            values.join(" | "),
            summary.total(),
            summary.rank
        ));
    }

    output
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Per-document view used to diagnose how stored documents were read.
pub fn entries_to_markdown(entries: &[ScoreEntry]) -> String {
    if entries.is_empty() {
        return format!("{NO_SCORES}\n");
    }
    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "- {}/{} [{}] judge={:?} house={}: {}total={:.2}\n",
            entry.collection,
            entry.document,
            if entry.category.is_empty() {
                "-"
            } else {
                entry.category.as_str()
            },
            entry.judge,
            entry.house,
            CanonicalField::CRITERIA
                .iter()
                .map(|field| format!("{}={:.2} ", field.as_str(), entry.score.get(*field)))
                .collect::<String>(),
            entry.score.total
        ));
    }
    output
}
