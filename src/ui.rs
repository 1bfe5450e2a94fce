//! Output formatting for the command line.
//!
//! Pure display functions; no prompting or input handling.

use crate::check::CheckReport;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a non-fail-fast check report: each offending commit on its own
/// line, then a one-line summary.
pub fn display_check_report(report: &CheckReport) {
    for failure in &report.failures {
        eprintln!(
            "{} {} {}",
            style("✗").red(),
            style(&failure.id).cyan(),
            failure.summary
        );
        eprintln!("    {}", failure.error);
    }

    if report.is_clean() {
        display_success(&format!("{} commits checked", report.checked));
    } else {
        display_error(&format!(
            "{} of {} commits failed validation",
            report.failures.len(),
            report.checked
        ));
    }
}
