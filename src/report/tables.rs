//! LaTeX table bodies for the power report

use super::stats::Summary;
use super::ReportParams;

const LABEL_PAD: &str = "              ";

/// CPU and RAM power from the RAPL readings
pub fn rapl_table(cpu: &Summary, ram: &Summary) -> String {
    let mut table = format!("{} & CPU     & RAM\\\\\\toprule\n", LABEL_PAD);
    table += &format!("10~\\% quantile & {:.3} W & {:.3} W \\\\\n", cpu.q10, ram.q10);
    table += &format!("Mean           & {:.3} W & {:.3} W \\\\\n", cpu.mean, ram.mean);
    table += &format!("90~\\% quantile & {:.3} W & {:.3} W \\\\\\bottomrule\n", cpu.q90, ram.q90);
    table
}

/// Per-factor breakdown of one node's power draw
pub fn summary_table(cpu: &Summary, ram: &Summary, network: &Summary, params: &ReportParams) -> String {
    let storage = params.storage_w;
    let total = |pick: fn(&Summary) -> f64| pick(cpu) + pick(ram) + pick(network) + storage;

    let rows = [
        format!(
            "10~\\% quantile & {:.3} W & {:.3} W & {:.3} W & ---     & {:.3} W",
            cpu.q10,
            ram.q10,
            network.q10,
            total(|s| s.q10)
        ),
        format!(
            "Mean           & {:.3} W & {:.3} W & {:.3} W & {:.3} W & {:.3} W",
            cpu.mean,
            ram.mean,
            network.mean,
            storage,
            total(|s| s.mean)
        ),
        format!(
            "90~\\% quantile & {:.3} W & {:.3} W & {:.3} W & ---     & {:.3} W",
            cpu.q90,
            ram.q90,
            network.q90,
            total(|s| s.q90)
        ),
    ];

    let header = [LABEL_PAD, "CPU    ", "RAM", "Network", "Storage", "Total"].join(" & ");
    format!("{}\\\\\\toprule\n{}\\\\\\bottomrule\n", header, rows.join("\\\\\n"))
}

/// Facility-level draw per node and for the whole network
///
/// Host power (CPU, RAM, storage) is scaled by the PUE exactly once in every
/// row; network transfer power is not. Earlier report drafts scaled the
/// quantile rows twice and left storage unscaled in the mean row, so their
/// kW figures differ from this table.
pub fn total_power_table(cpu: &Summary, ram: &Summary, network: &Summary, params: &ReportParams) -> String {
    let per_node = |pick: fn(&Summary) -> f64| {
        params.pue * (pick(cpu) + pick(ram) + params.storage_w) + pick(network)
    };
    let row = |label: &str, watts: f64| {
        format!("{} & {:.3} W & {:.3} kW", label, watts, watts * params.nodes as f64 / 1000.0)
    };

    let rows = [
        row("10~\\% quantile", per_node(|s| s.q10)),
        row("Mean          ", per_node(|s| s.mean)),
        row("90~\\% quantile", per_node(|s| s.q90)),
    ];

    let header = [LABEL_PAD, "Power per node", "Total power"].join(" & ");
    format!("{}\\\\\\toprule\n{}\\\\\\bottomrule\n", header, rows.join("\\\\\n"))
}
