use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to at most `max_width` terminal cells, appending an
/// ellipsis when anything was cut. Never splits a wide character.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1); // room for the ellipsis
    let mut out = String::new();
    let mut used = 0usize;

    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }

    out.push('…');
    out
}

/// Classification used by the default comparator's type probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Numeric,
    Text,
}

/// Parse a cell into a number, tolerating thousand separators and a leading
/// currency symbol or trailing percent sign.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }

    if let Some(pct) = trimmed.strip_suffix('%') {
        let cleaned: String = pct.chars().filter(|c| *c != ',').collect();
        if let Ok(n) = cleaned.trim().parse::<f64>() {
            return Some(n / 100.0);
        }
    }

    let (body, negative) = match trimmed.strip_prefix('-') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed, false),
    };

    let currency_chars = ['$', '€', '£', '¥'];
    if currency_chars.iter().any(|&c| body.starts_with(c)) {
        let without_symbol: String = body.chars().skip(1).collect();
        let cleaned: String = without_symbol.chars().filter(|c| *c != ',').collect();
        if let Ok(n) = cleaned.trim().parse::<f64>() {
            return Some(if negative { -n } else { n });
        }
    }

    // Plain number with thousand separators: 1,234,567.89
    if body.contains(',') {
        let cleaned: String = body.chars().filter(|c| *c != ',').collect();
        if let Ok(n) = cleaned.parse::<f64>() {
            return Some(if negative { -n } else { n });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcde", 5), "abcde");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 5), "abcd…");
        assert_eq!(truncate_to_width("abcdef", 1), "…");
    }

    #[test]
    fn truncate_zero_width_is_empty() {
        assert_eq!(truncate_to_width("abcdef", 0), "");
    }

    #[test]
    fn parse_numeric_plain_and_scientific() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric("-3.5"), Some(-3.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("running"), None);
    }

    #[test]
    fn parse_numeric_formatted() {
        assert_eq!(parse_numeric("50%"), Some(0.5));
        assert_eq!(parse_numeric("$1,200"), Some(1200.0));
        assert_eq!(parse_numeric("-$3"), Some(-3.0));
        assert_eq!(parse_numeric("1,234.5"), Some(1234.5));
    }
}
