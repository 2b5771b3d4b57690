//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{Dataset, FitRecord, SearchSummary, TrialStats};
use crate::fit::selection::Leaderboard;

/// Per-fit lines: coefficients, then variables and scores.
pub fn format_record(record: &FitRecord) -> String {
    format!(
        "Coefficients: {}\nVariables: {}, MSE: {:.4}, AIC: {:.4}",
        fmt_list(record.coefficients.iter().map(|c| c.to_string())),
        fmt_list(record.subset.iter().map(|i| i.to_string())),
        record.mse,
        record.aic
    )
}

/// Dataset stats + sweep counts + leaderboard + best subset per size.
pub fn format_search_summary(
    dataset: &Dataset,
    target_name: &str,
    summary: &SearchSummary,
    board: &Leaderboard,
) -> String {
    let mut out = String::new();

    out.push_str("=== bss - Best Subset Regression ===\n");
    out.push_str(&format!(
        "Data: rows={} | features={} | target={target_name}\n",
        dataset.n_obs(),
        dataset.feature_count()
    ));
    match (summary.sizes.first(), summary.sizes.last()) {
        (Some(lo), Some(hi)) => out.push_str(&format!("Subset sizes: {lo}..={hi}\n")),
        _ => out.push_str("Subset sizes: none (too few features)\n"),
    }
    out.push_str(&format!(
        "Fits: evaluated={} | failed={} | degenerate={}\n",
        summary.evaluated, summary.failed, summary.degenerate
    ));

    let criterion = board.criterion().display_name();
    out.push_str(&format!("\nTop subsets by {criterion}:\n"));
    out.push_str(&format_table(board.top(), dataset));

    out.push_str(&format!("\nBest subset per size ({criterion}):\n"));
    out.push_str(&format_table(board.best_per_size(), dataset));

    if let Some(best) = board.best() {
        out.push_str("\nChosen subset:\n");
        out.push_str(&format!(
            "- features: {}\n",
            dataset.subset_labels(&best.subset).join(", ")
        ));
        out.push_str(&format!("- coefficients: {}\n", fmt_vec(&best.coefficients)));
    }

    out
}

/// Summary of repeated sweep timings.
pub fn format_trial_stats(stats: &TrialStats) -> String {
    let mut out = String::new();
    out.push_str("Summary Statistics For Experimental Trial Runtimes\n");
    out.push_str(&format!("Trials: {}\n", stats.runtimes_us.len()));
    out.push_str("Runtime Sum in Microseconds\n");
    out.push_str(&format!("{}\n", stats.total_us));
    out.push_str("Average Trial Runtime in Microseconds\n");
    out.push_str(&format!("{:.6}\n", stats.mean_us));
    out
}

fn format_table(rows: &[FitRecord], dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>14} {:>14}  {}\n",
        "k", "MSE", "AIC", "features"
    ));
    out.push_str(&format!("{:-<4} {:-<14} {:-<14}  {:-<24}\n", "", "", "", ""));

    for r in rows {
        let flag = if r.degenerate { " (degenerate)" } else { "" };
        out.push_str(&format!(
            "{:>4} {:>14.4} {:>14.4}  {}{flag}\n",
            r.size(),
            r.mse,
            r.aic,
            truncate(&dataset.subset_labels(&r.subset).join(","), 60),
        ));
    }

    out
}

fn fmt_list(parts: impl Iterator<Item = String>) -> String {
    format!("[{}]", parts.collect::<Vec<_>>().join(" "))
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RankBy;

    #[test]
    fn record_lines_match_sweep_log_format() {
        let record = FitRecord::new(vec![0, 2, 3, 5], vec![1.5, -2.0, 0.25, 4.0, 3.0], 0.123456, 1.1111);
        let text = format_record(&record);
        assert_eq!(
            text,
            "Coefficients: [1.5 -2 0.25 4 3]\nVariables: [0 2 3 5], MSE: 0.1235, AIC: 1.1111"
        );
    }

    #[test]
    fn summary_lists_leaders_with_feature_names() {
        let ds = Dataset::new(vec![vec![0.0; 5]; 3], vec![0.0; 3])
            .unwrap()
            .with_feature_names(vec!["crim".into(), "zn".into(), "indus".into(), "chas".into(), "nox".into()]);
        let mut board = Leaderboard::new(RankBy::Aic, 3);
        board.push(&FitRecord::new(vec![0, 1, 2, 4], vec![0.0; 5], 2.0, 18.0));
        board.push(&FitRecord::new(vec![0, 1, 2, 3, 4], vec![0.0; 6], 1.0, 11.0));
        let summary = SearchSummary {
            sizes: vec![4, 5],
            evaluated: 6,
            failed: 0,
            degenerate: 0,
        };

        let text = format_search_summary(&ds, "mv", &summary, &board);
        assert!(text.contains("Subset sizes: 4..=5"));
        assert!(text.contains("crim,zn,indus,nox"));
        assert!(text.contains("- features: crim, zn, indus, chas, nox"));
    }

    #[test]
    fn trial_summary_reports_sum_and_average() {
        let text = format_trial_stats(&TrialStats::from_runtimes(vec![10, 20]));
        assert!(text.contains("Runtime Sum in Microseconds\n30\n"));
        assert!(text.contains("Average Trial Runtime in Microseconds\n15.000000\n"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
