//! Fixed-width text rendering of the summary table for stdout.

use super::schema::{SummaryRow, SUMMARY_COLUMNS};

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NaN".to_string(),
    }
}

/// Render rows as an aligned table, undefined metrics shown as `NaN`
pub fn format_summary_table(rows: &[SummaryRow]) -> String {
    let body: Vec<[String; 8]> = rows
        .iter()
        .map(|r| {
            [
                r.run_id.clone(),
                cell(r.resource_slope_per_hour),
                cell(r.resource_mk_pvalue),
                cell(r.p95_slope_per_hour),
                cell(r.p95_mk_pvalue),
                cell(r.delta_resource_early_late),
                cell(r.delta_p95_early_late),
                r.total_errors.map_or_else(|| "NaN".to_string(), |e| e.to_string()),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = SUMMARY_COLUMNS.iter().map(|c| c.len()).collect();
    for line in &body {
        for (w, field) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(field.len());
        }
    }

    let render = |fields: Vec<&str>| -> String {
        fields
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (f, w))| {
                // run id left-aligned, numbers right-aligned
                if i == 0 {
                    format!("{:<w$}", f, w = *w)
                } else {
                    format!("{:>w$}", f, w = *w)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = render(SUMMARY_COLUMNS.to_vec());
    for line in &body {
        out.push('\n');
        out.push_str(&render(line.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary_table() {
        let rows = vec![SummaryRow {
            run_id: "gemini-2.5-flash-445".to_string(),
            resource_slope_per_hour: Some(100.0),
            resource_mk_pvalue: Some(0.0),
            p95_slope_per_hour: None,
            p95_mk_pvalue: None,
            delta_resource_early_late: Some(-2.5),
            delta_p95_early_late: None,
            total_errors: Some(7),
        }];

        let table = format_summary_table(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("run_id"));
        assert!(lines[1].starts_with("gemini-2.5-flash-445"));
        assert!(lines[1].contains("100.000000"));
        assert!(lines[1].contains("NaN"));
        assert!(lines[1].ends_with('7'));
        assert_eq!(lines[0].len(), lines[1].len());
    }
}
