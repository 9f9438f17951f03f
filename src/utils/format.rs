use rust_decimal::Decimal;

/// Format a price for display, always two decimal places: "$12.75"
pub fn format_price(price: &Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an order timestamp for display, or a dash when absent.
/// Tries RFC3339 first; the backend usually sends Go's `time.Time` string
/// form instead, where the leading "YYYY-MM-DD HH:MM:SS" is kept as-is.
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date else {
        return "-".to_string();
    };

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }

    if date.len() >= 19 {
        date.chars().take(19).collect()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        let total = "9.50".parse::<Decimal>().unwrap() + "3.25".parse::<Decimal>().unwrap();
        assert_eq!(format_price(&total), "$12.75");
        assert_eq!(format_price(&Decimal::ZERO), "$0.00");
        assert_eq!(format_price(&"7".parse::<Decimal>().unwrap()), "$7.00");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "-");
        assert_eq!(
            format_date(Some("2026-07-01T18:30:00Z")),
            "Jul 01, 2026 18:30"
        );
        // Go time.Time String() form
        assert_eq!(
            format_date(Some("2026-07-01 18:30:00.123456789 +0000 UTC")),
            "2026-07-01 18:30:00"
        );
        assert_eq!(format_date(Some("2026-07-01")), "2026-07-01");
    }
}
