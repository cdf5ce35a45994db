//! Number formatting for tables (Indian digit grouping, rupees).

/// `1234567.891` with 2 decimals -> `12,34,567.89`
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let grouped = group_indian(integer_part);
    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

pub fn format_rupees(value: f64) -> String {
    format!("₹{}", format_money(value))
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// `-` for missing values
pub fn format_opt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format_number_with_decimals(v, decimals))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.891), "12,34,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.5), "-1,234.50");
        assert_eq!(format_rupees(1180.0), "₹1,180.00");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(100000.0), "1,00,000");
        assert_eq!(format_number_int(999.0), "999");
        assert_eq!(format_opt(None, 2), "-");
        assert_eq!(format_opt(Some(12.5), 1), "12.5");
    }
}
