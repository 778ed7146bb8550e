//! Display formatting for currency amounts.

/// Format a whole amount with thousands separators, e.g. `$5,000,000`.
pub fn format_amount(amount: u64) -> String {
    format!("${}", group_digits(&amount.to_string()))
}

/// Format a fractional amount with at most three decimals, trailing zeros dropped.
pub fn format_decimal(amount: f64) -> String {
    let rendered = format!("{:.3}", amount.abs());
    let (whole, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    let sign = if amount < 0.0 && rendered != "0.000" { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}${}", group_digits(whole))
    } else {
        format!("{sign}${}.{frac}", group_digits(whole))
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(0), "$0");
        assert_eq!(format_amount(999), "$999");
        assert_eq!(format_amount(1000), "$1,000");
        assert_eq!(format_amount(4_876_712), "$4,876,712");
    }

    #[test]
    fn decimals_are_trimmed() {
        assert_eq!(format_decimal(20_000.0), "$20,000");
        assert_eq!(format_decimal(20_408.163265), "$20,408.163");
        assert_eq!(format_decimal(0.5), "$0.5");
    }
}
