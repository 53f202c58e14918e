use std::time::Duration;

use serde::Serialize;

use crate::config::LoadSettings;
use crate::load::{BatchResult, OutcomeCounts, Report};

/// Lines printed before any request is dispatched.
pub(crate) fn header_lines(settings: &LoadSettings, worker_count: u64) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Fetch URL : {}", settings.url));
    lines.push(format!(
        "Fetch Timeout : {} seconds",
        format_seconds(settings.timeout)
    ));
    lines.push(format!("Load : {} Iterations", settings.iterations.get()));
    if settings.print_worker_stats {
        lines.push(format!(
            "Load Distribution : Maximum {} iterations per Worker",
            settings.quantum.get()
        ));
        lines.push(format!("Workers Count : {}", worker_count));
    }
    lines.push(format!("Interface : {}", settings.interface));
    lines.push(String::new());
    lines.push("Running Requests...".to_owned());
    lines
}

/// Per-worker blocks (in queue read order) followed by the overall block.
pub(crate) fn report_lines(report: &Report, print_worker_stats: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if print_worker_stats {
        for (index, worker) in report.workers.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("Worker {} Stats :", index.saturating_add(1)));
            push_counts(&mut lines, worker);
        }
        lines.push(String::new());
        lines.push("Overall Statistics :".to_owned());
    } else {
        lines.push(String::new());
        lines.push("Statistics :".to_owned());
    }
    push_counts(&mut lines, &report.totals);
    lines
}

fn push_counts(lines: &mut Vec<String>, counts: &OutcomeCounts) {
    lines.push(format!("Succeeded Requests : {}", counts.success));
    lines.push(format!("Connection Errors : {}", counts.conn_err));
    lines.push(format!("Read Timeout : {}", counts.timeout));
    lines.push(format!("Generic Errors : {}", counts.generic_err));
}

fn format_seconds(timeout: Duration) -> String {
    let millis = timeout.subsec_millis();
    if millis == 0 {
        return timeout.as_secs().to_string();
    }
    let fraction = format!("{:03}", millis);
    format!("{}.{}", timeout.as_secs(), fraction.trim_end_matches('0'))
}

/// Machine-readable report for `--output-format json`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonReport<'run> {
    url: &'run str,
    interface: &'run str,
    timeout_ms: u128,
    iterations: u64,
    quantum: u64,
    worker_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    workers: Option<&'run [BatchResult]>,
    totals: OutcomeCounts,
}

impl<'run> JsonReport<'run> {
    pub(crate) fn new(settings: &'run LoadSettings, report: &'run Report) -> Self {
        Self {
            url: settings.url.as_str(),
            interface: &settings.interface,
            timeout_ms: settings.timeout.as_millis(),
            iterations: report.iterations,
            quantum: report.quantum,
            worker_count: report.worker_count,
            workers: (!report.workers.is_empty()).then_some(report.workers.as_slice()),
            totals: report.totals,
        }
    }
}
