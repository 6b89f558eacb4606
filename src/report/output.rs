use serde::Serialize;

use super::types::{ComplianceResult, Mode, Report, ViolationKind};

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    data: &'a Report,
}

/// Print the report as text lines or as pretty JSON
pub fn print_report(report: &Report, verbose: bool, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: report.all_ok, data: report })?
        );
    } else {
        for line in report_lines(report, verbose) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Text diagnostics for a report, in path order
pub fn report_lines(report: &Report, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for result in &report.results {
        if verbose {
            lines.push(format!("Checking {}", result.relative.display()));
        }
        if let Some(line) = result_line(result) {
            lines.push(line);
        }
    }

    if report.mode == Mode::Check {
        let total = report.stats.total_files;
        if report.all_ok {
            lines.push(format!("{} file(s) checked, all compliant", total));
        } else {
            lines.push(format!(
                "{} of {} file(s) failed the license header check",
                report.stats.failed_files(),
                total
            ));
        }
    }

    lines
}

fn result_line(result: &ComplianceResult) -> Option<String> {
    let path = result.relative.display();
    if result.fixed {
        return Some(format!("Add license header to file {}", path));
    }
    if result.ok {
        return None;
    }

    let line = match result.kind {
        Some(ViolationKind::NotFound) => format!("File {} does not exist", path),
        Some(ViolationKind::MissingHeader) => format!("{} is missing a license header", path),
        _ => format!("{}: {}", path, result.reason.as_deref().unwrap_or("unknown error")),
    };
    Some(line)
}
