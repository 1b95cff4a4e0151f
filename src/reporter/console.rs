use crate::engine::AnalysisResult;
use crate::rules::{Impact, Issue};
use colored::Colorize;
use std::fmt::Write;

pub fn report(results: &[AnalysisResult], verbose: bool) {
    print!("{}", render(results, verbose));
}

/// Render the full console report: a summary block, then issues grouped by file.
pub fn render(results: &[AnalysisResult], verbose: bool) -> String {
    let mut out = String::new();
    let (high, medium, low) = count_by_impact(results);
    let total = high + medium + low;

    let _ = writeln!(out, "{}", "Analysis Summary:".bold());
    let _ = writeln!(out, "   Files analyzed: {}", results.len());
    let _ = writeln!(out, "   Total issues: {}", total);
    let _ = writeln!(
        out,
        "   High impact: {} | Medium: {} | Low: {}",
        high, medium, low
    );
    out.push('\n');

    if total == 0 {
        let _ = writeln!(out, "{}", "No performance issues detected!".green());
        return out;
    }

    for result in results.iter().filter(|r| !r.issues.is_empty()) {
        let _ = writeln!(out, "{}", result.file_path.display().to_string().bold());
        for issue in &result.issues {
            out.push_str(&render_issue(issue, verbose));
        }
        out.push('\n');
    }

    out
}

fn render_issue(issue: &Issue, verbose: bool) -> String {
    let icon = match issue.impact {
        Impact::High => "[!]".red().bold(),
        Impact::Medium => "[*]".yellow().bold(),
        Impact::Low => "[i]".blue().bold(),
    };

    let mut out = format!(
        "   {} Line {}: {} ({} impact)\n",
        icon, issue.line, issue.title, issue.impact
    );

    if verbose {
        let _ = writeln!(out, "       {}", issue.description);
        if !issue.suggestion.is_empty() {
            let _ = writeln!(out, "       {} {}", "Suggestion:".cyan(), issue.suggestion);
        }
    }

    out
}

/// Count issues across all results as (high, medium, low).
pub fn count_by_impact(results: &[AnalysisResult]) -> (usize, usize, usize) {
    let issues = || results.iter().flat_map(|r| r.issues.iter());
    let count = |impact: Impact| issues().filter(|i| i.impact == impact).count();
    (count(Impact::High), count(Impact::Medium), count(Impact::Low))
}
