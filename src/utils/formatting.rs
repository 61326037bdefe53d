//! Formatting helpers for CLI output.

use crate::config::NumberFormat;
use unicode_width::UnicodeWidthStr;

/// Group the integer part in threes and render two decimals.
///
/// `pt-BR` → `R$ 1.234,56`, `en-US` → `$ 1,234.56`.
pub fn format_currency(value: f64, symbol: &str, fmt: NumberFormat) -> String {
    let (thousands, decimal) = match fmt {
        NumberFormat::PtBr => ('.', ','),
        NumberFormat::EnUs => (',', '.'),
    };

    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{grouped}{decimal}{frac:02}")
    } else {
        format!("{sign}{symbol} {grouped}{decimal}{frac:02}")
    }
}

/// Cut to `max` display columns, marking the cut with `…`.
pub fn truncate_display(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// `-` for absent values.
pub fn or_dash(v: Option<&str>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_br_grouping() {
        assert_eq!(
            format_currency(1234567.891, "R$", NumberFormat::PtBr),
            "R$ 1.234.567,89"
        );
        assert_eq!(format_currency(-700.0, "R$", NumberFormat::PtBr), "-R$ 700,00");
        assert_eq!(format_currency(0.0, "", NumberFormat::PtBr), "0,00");
    }

    #[test]
    fn en_us_grouping() {
        assert_eq!(format_currency(1000.5, "$", NumberFormat::EnUs), "$ 1,000.50");
        assert_eq!(format_currency(999.999, "$", NumberFormat::EnUs), "$ 1,000.00");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate_display("abc", 5), "abc");
        assert_eq!(truncate_display("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_display("日本語テキスト", 5), "日本…");
    }
}
