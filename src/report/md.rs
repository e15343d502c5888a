use super::ScoreReport;
use crate::types::score::Score;

fn percentile_cell(score: &Score) -> String {
    score
        .summary()
        .benchmark_percentile
        .map(|percentile| format!("{percentile:.1}"))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# ESG Scores: {} ({})\n\n",
        report.company_id, report.period_year
    ));
    output.push_str(&format!("Segment: {}\n\n", report.segment));

    output.push_str("## Categories\n\n");
    if report.category_rows().next().is_none() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| category | score | level | percentile | metrics | benchmarked | completeness |\n");
        output.push_str("|---|---|---|---|---|---|---|\n");
        for row in report.category_rows() {
            let summary = row.summary();
            output.push_str(&format!(
                "| {} | {:.1} | {} | {} | {} | {} | {:.0}% |\n",
                row.category(),
                summary.score,
                summary.level,
                percentile_cell(row),
                summary.metric_count,
                summary.metrics_with_benchmarks,
                summary.data_completeness * 100.0
            ));
        }
        output.push('\n');
    }

    output.push_str("## Subcategories\n\n");
    if report.subcategory_rows().next().is_none() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| category | subcategory | score | level | percentile | metrics |\n");
        output.push_str("|---|---|---|---|---|---|\n");
        for row in report.subcategory_rows() {
            let summary = row.summary();
            output.push_str(&format!(
                "| {} | {} | {:.1} | {} | {} | {} |\n",
                row.category(),
                row.subcategory().unwrap_or_default(),
                summary.score,
                summary.level,
                percentile_cell(row),
                summary.metric_count
            ));
        }
        output.push('\n');
    }

    output.push_str("## Diagnostics\n\n");
    if report.diagnostics.is_empty() {
        output.push_str("- none\n");
    } else {
        for diagnostic in &report.diagnostics {
            output.push_str(&format!(
                "- [{:?}] {}: {}\n",
                diagnostic.kind, diagnostic.subject, diagnostic.detail
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&fixtures::report());
        assert!(rendered.contains("# ESG Scores: C (2024)"));
        assert!(rendered.contains("Segment: Technology/medium/UK"));
        assert!(rendered.contains("| environmental | 80.0 | leading | 62.5 | 2 | 1 | 100% |"));
        assert!(rendered.contains("| environmental | emissions | 80.0 | leading | n/a | 2 |"));
        assert!(rendered.contains("[InvalidBenchmark]"));
    }
}
