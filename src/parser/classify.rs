use std::sync::LazyLock;

use regex::Regex;

// `\d` is any Unicode decimal digit. `.` stops at a newline, so `rest` only
// covers the first line of the paragraph.
static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(.*)").unwrap());
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d$").unwrap());

/// One paragraph after trimming, tagged by its leading-number shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph<'a> {
    Blank,
    Numbered {
        number: u128,
        rest: &'a str,
        /// The whole trimmed paragraph, digits included.
        text: &'a str,
    },
    Text(&'a str),
}

pub fn classify(raw: &str) -> Paragraph<'_> {
    let text = raw.trim();
    if text.is_empty() {
        return Paragraph::Blank;
    }

    let Some(caps) = LEADING_NUMBER_RE.captures(text) else {
        return Paragraph::Text(text);
    };

    // A number too large to be followed by a successor can never continue a sequence.
    let number = match parse_number(&caps[1]) {
        Some(n) if n < u128::MAX => n,
        _ => return Paragraph::Text(text),
    };
    let rest = caps.get(2).map_or("", |m| m.as_str().trim());

    Paragraph::Numbered { number, rest, text }
}

fn parse_number(digits: &str) -> Option<u128> {
    digits.chars().try_fold(0u128, |acc, c| {
        acc.checked_mul(10)?.checked_add(u128::from(digit_value(c)?))
    })
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit from any script. Decimal digits are laid out in
/// contiguous runs of ten starting at zero, so the value is the offset from
/// the start of the run, counted modulo ten across back-to-back runs.
fn digit_value(c: char) -> Option<u32> {
    if let Some(v) = c.to_digit(10) {
        return Some(v);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut offset = 0;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank() {
        assert_eq!(classify(""), Paragraph::Blank);
        assert_eq!(classify("   \t\n"), Paragraph::Blank);
    }

    #[test]
    fn numbered() {
        assert_eq!(
            classify("  12 Some joke  "),
            Paragraph::Numbered { number: 12, rest: "Some joke", text: "12 Some joke" }
        );
    }

    #[test]
    fn numbered_without_space() {
        assert!(matches!(classify("7.A dot"), Paragraph::Numbered { number: 7, rest: ".A dot", .. }));
        assert!(matches!(classify("3abc"), Paragraph::Numbered { number: 3, rest: "abc", .. }));
    }

    #[test]
    fn bare_number() {
        assert!(matches!(classify("42"), Paragraph::Numbered { number: 42, rest: "", .. }));
    }

    #[test]
    fn rest_stops_at_newline() {
        let p = classify("5 first line\nsecond line");
        assert!(matches!(p, Paragraph::Numbered { number: 5, rest: "first line", text } if text.ends_with("second line")));
    }

    #[test]
    fn digits_after_newline_whitespace() {
        assert!(matches!(classify("9\nbody"), Paragraph::Numbered { number: 9, rest: "body", .. }));
    }

    #[test]
    fn text() {
        assert_eq!(classify("no number here"), Paragraph::Text("no number here"));
        assert_eq!(classify("page 12"), Paragraph::Text("page 12"));
    }

    #[test]
    fn arabic_indic_digits() {
        assert_eq!(
            classify("٣ joke"),
            Paragraph::Numbered { number: 3, rest: "joke", text: "٣ joke" }
        );
        assert!(matches!(classify("١٢ twelve"), Paragraph::Numbered { number: 12, .. }));
    }

    #[test]
    fn fullwidth_and_mixed_digits() {
        assert!(matches!(classify("１ full"), Paragraph::Numbered { number: 1, rest: "full", .. }));
        assert!(matches!(classify("1٢ mixed"), Paragraph::Numbered { number: 12, .. }));
    }

    #[test]
    fn back_to_back_digit_runs() {
        // Mathematical bold nine, then double-struck zero from the next run.
        assert!(matches!(classify("\u{1D7D7} x"), Paragraph::Numbered { number: 9, .. }));
        assert!(matches!(classify("\u{1D7D8} x"), Paragraph::Numbered { number: 0, .. }));
    }

    #[test]
    fn digit_values() {
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('٠'), Some(0));
        assert_eq!(digit_value('९'), Some(9));
        assert_eq!(digit_value('a'), None);
        assert_eq!(digit_value('½'), None);
    }

    #[test]
    fn wide_numbers() {
        assert!(matches!(
            classify("99999999999999999999999 big"),
            Paragraph::Numbered { number: 99_999_999_999_999_999_999_999, rest: "big", .. }
        ));
    }

    #[test]
    fn overflowing_number_is_text() {
        let huge = format!("{}0 big", u128::MAX);
        assert_eq!(classify(&huge), Paragraph::Text(huge.as_str()));
        let max = format!("{} max", u128::MAX);
        assert_eq!(classify(&max), Paragraph::Text(max.as_str()));
    }

    #[test]
    fn leading_zeros() {
        assert!(matches!(classify("007 bond"), Paragraph::Numbered { number: 7, rest: "bond", .. }));
    }
}
