//! Plain-text report blocks, fenced for chat.
//!
//! Every function here is a pure function of its input: the same data always
//! renders to the same bytes.

use chrono::NaiveDate;

use crate::core::formatter::{format_count, format_money, format_status};
use crate::core::i18n::{Lang, Message};
use crate::core::kind::ResourceKind;
use crate::core::models::cost::CostBreakdown;
use crate::core::models::metric::DatapointSeries;
use crate::core::models::resource::MatchSet;

const RULE: &str = "====================================";
const COST_RULE: &str = "------------------------";

fn fenced(lines: &[String]) -> String {
    format!("```\n{}\n```", lines.join("\n"))
}

/// Names only, in match order. Used when too many resources matched.
pub fn render_names(set: &MatchSet) -> String {
    let lines: Vec<String> = set.resources.iter().map(|r| r.name.clone()).collect();
    fenced(&lines)
}

/// One line per resource, with indented sub-resources for tables.
pub fn render_stats(kind: ResourceKind, set: &MatchSet) -> String {
    let mut lines = Vec::with_capacity(set.len() * 2 + 2);
    match kind {
        ResourceKind::Queue => {
            lines.push("Name\t|\tVisible (NotVisible)".to_string());
            lines.push(RULE.to_string());
            for q in &set.resources {
                lines.push(format!(
                    "{}\t|\t{} ({})",
                    q.name,
                    format_count(q.item_count),
                    format_count(q.in_flight_count)
                ));
            }
        }
        ResourceKind::Table => {
            lines.push("Name\t|\tStatus\t|\tCount (MB)".to_string());
            lines.push(RULE.to_string());
            for t in &set.resources {
                lines.push(format!(
                    "{}\t|\t{}\t|\t{} ({})",
                    t.name,
                    format_status(t.status.as_deref()),
                    format_count(t.item_count),
                    format_count(t.size_mb)
                ));
                for index in &t.sub_resources {
                    lines.push(format!(
                        "\t- {}\t|\t{}\t|\t{} ({})",
                        index.name,
                        format_status(index.status.as_deref()),
                        format_count(index.item_count),
                        format_count(index.size_mb)
                    ));
                }
            }
        }
    }
    fenced(&lines)
}

/// Current (first fetched) value of each metric.
pub fn render_metric_summary(name: &str, series: &DatapointSeries) -> String {
    let mut lines = vec![format!("[{}]", name), RULE.to_string()];
    for (metric, value) in series.current_by_metric() {
        lines.push(format!("{}\t:\t{}", metric, format_metric_value(value)));
    }
    fenced(&lines)
}

fn format_metric_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format_count(Some(value as i64))
    } else {
        format!("{:.2}", value)
    }
}

/// Daily cost report: total, services by cost descending (ties by name), remainder.
pub fn render_cost_report(costs: &CostBreakdown, date: NaiveDate, lang: Lang) -> String {
    let date = date.format("%Y-%m-%d").to_string();
    let mut lines = Vec::with_capacity(costs.services.len() + 4);
    lines.push(Message::CostHeader { date: &date }.render(lang));
    lines.push(format!("- Total:\t{}", format_money(costs.total)));
    lines.push(COST_RULE.to_string());
    for (service, cost) in costs.sorted_services() {
        lines.push(format!("- {}:\t{}", service, format_money(cost)));
    }
    lines.push(format!("- (Other):\t{}", format_money(costs.other)));
    fenced(&lines)
}
