/// Integer with thousands separators: 1234567 -> "1,234,567".
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Statistic card value: two decimals with separators, em dash when absent.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => {
            let negative = v < 0.0;
            let abs = v.abs();
            let whole = abs.trunc() as u64;
            let frac = ((abs - abs.trunc()) * 100.0).round() as u64;
            // carry when the fraction rounds up to 1.00
            let (whole, frac) = if frac >= 100 { (whole + 1, 0) } else { (whole, frac) };
            let sign = if negative { "-" } else { "" };
            format!("{}{}.{:02}", sign, format_count(whole), frac)
        }
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(Some(1234.5)), "1,234.50");
        assert_eq!(format_stat(Some(-2.345)), "-2.35");
        assert_eq!(format_stat(Some(0.999)), "1.00");
        assert_eq!(format_stat(None), "—");
    }
}
