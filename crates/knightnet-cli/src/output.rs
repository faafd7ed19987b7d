//! Report rendering: terminal tables or JSON.

use std::fmt::Write as _;

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use knightnet_core::Edge;

use crate::driver::{CaseOutcome, CaseReport, SpanPhase};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,
    /// One pretty-printed JSON document per case.
    Json,
}

/// Renders a case report in the requested format.
pub fn render(
    report: &CaseReport,
    case_number: usize,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(render_table(report, case_number)),
    }
}

fn edge_table(edges: &[Edge]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Node A", "Node B", "Cost", "Visibility"]);
    for edge in edges {
        let (low, high) = edge.canonical_pair();
        table.add_row(vec![
            Cell::new(low),
            Cell::new(high),
            Cell::new(edge.cost()).set_alignment(CellAlignment::Right),
            Cell::new(edge.visibility()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn write_phase(out: &mut String, heading: &str, cost_label: &str, phase: &SpanPhase) {
    let _ = writeln!(out, "{}", heading.bold().cyan());
    let _ = writeln!(out, "Start node: {}", phase.start.green());
    if phase.result.feasible {
        let _ = writeln!(out, "{}", edge_table(&phase.listed));
    } else {
        let _ = writeln!(
            out,
            "{}",
            "Network is not fully connectable under the visibility ceiling.".yellow()
        );
    }
    let _ = writeln!(out, "{cost_label}: {}", phase.result.total_cost);
}

fn render_table(report: &CaseReport, case_number: usize) -> String {
    let mut out = String::new();
    let rule = "-".repeat(24);
    let banner = format!("+{rule} Test Case {case_number} {rule}+");
    let _ = writeln!(out, "{}", banner.bold());
    let _ = writeln!(
        out,
        "Input: {}   Max visibility: {}",
        report.input.display(),
        report.max_visibility
    );
    for skipped in &report.skipped {
        let _ = writeln!(
            out,
            "{} line {}: {}",
            "skipped".yellow(),
            skipped.line,
            skipped.reason
        );
    }

    let _ = writeln!(out, "{}", "Real-only network".bold().cyan());
    let _ = writeln!(out, "{}", edge_table(&report.real_graph));

    match &report.outcome {
        CaseOutcome::NoRealNodes => {
            let _ = writeln!(out, "No real nodes available for MST computation.");
        }
        CaseOutcome::Reconnected {
            initial,
            breached,
            after,
        } => {
            write_phase(&mut out, "+++++++++++++ Initial MST +++++++++++++", "Total Cost", initial);
            write_breach(&mut out, breached);
            write_phase(
                &mut out,
                "+++++++++++++ Reconnected MST (after breach) +++++++++++++",
                "New Total Cost",
                after,
            );
        }
    }
    let _ = writeln!(
        out,
        "+--------------------------------------------------------------------+"
    );
    out
}

fn write_breach(out: &mut String, node: &str) {
    let _ = writeln!(
        out,
        "\n{}",
        format!("*** ALERT: Node breached: {node} ***").red().bold()
    );
}
