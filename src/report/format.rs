//! Number formatting for report output.

/// Format an amount as whole currency units with thousands separators,
/// e.g. `$1,234,567`.
pub fn format_currency(amount: f64) -> String {
    let whole = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 && whole != "0" { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&whole))
}

/// Format an amount with two decimals and thousands separators.
pub fn format_amount(amount: f64) -> String {
    let text = format!("{:.2}", amount.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount < 0.0 && text != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(whole), fraction)
}

/// Format a percentage with one decimal, e.g. `28.6%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Insert a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Text safe inside a Markdown table cell.
pub fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// A text bar scaled against `max`, at most `width` characters.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if width == 0 || max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "█".repeat(len.clamp(1, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1234.0), "$1,234");
        assert_eq!(format_currency(22650.4), "$22,650");
        assert_eq!(format_currency(-1500.0), "-$1,500");
        assert_eq!(format_currency(1234567.89), "$1,234,568");
        assert_eq!(format_currency(-0.0), "$0");
    }

    #[test]
    fn test_table_cell_escapes_pipes() {
        assert_eq!(table_cell("Zoe | Fit"), "Zoe \\| Fit");
        assert_eq!(table_cell("two\nlines"), "two lines");
        assert_eq!(table_cell("Instagram"), "Instagram");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5400.5), "5,400.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(100.0), "100.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(100.0 / 7.0), "14.3%");
        assert_eq!(format_percent(50.0), "50.0%");
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(10.0, 10.0, 5).chars().count(), 5);
        assert_eq!(bar(5.0, 10.0, 10).chars().count(), 5);
        assert_eq!(bar(0.01, 10.0, 10).chars().count(), 1);
        assert!(bar(0.0, 10.0, 10).is_empty());
        assert!(bar(5.0, 0.0, 10).is_empty());
    }
}
