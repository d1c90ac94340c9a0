use crate::core::i18n::comma_number;

/// Returns "$123.45". Negative amounts keep their sign after the dollar: "$-2.00".
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Returns a comma-grouped count, "0" when the provider reported nothing.
pub fn format_count(count: Option<i64>) -> String {
    comma_number(count.unwrap_or(0))
}

/// Returns the status, or "-" when absent.
pub fn format_status(status: Option<&str>) -> String {
    match status {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}
