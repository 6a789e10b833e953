use chrono::{SecondsFormat, Utc};

/// Current time as an ISO-8601 / RFC 3339 UTC timestamp.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format an amount for log lines, e.g. "RM 2,500".
pub fn format_rm(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();
    if rounded < 0 {
        format!("RM -{grouped}")
    } else {
        format!("RM {grouped}")
    }
}
