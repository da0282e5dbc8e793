//! Page range parsing
//!
//! Turns a human-entered expression such as `"1-3,5,7"` into page numbers for
//! a document with a known page count. Parsing is permissive: tokens that
//! cannot be understood, or that fall entirely outside the document,
//! contribute nothing instead of failing the whole expression.

use schemars::JsonSchema;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Why a token contributed no pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// No leading integer could be read from the token (or one side of a range)
    NotANumber,
    /// The token parsed, but none of its pages exist in the document
    OutOfRange,
}

/// A token that was skipped while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct IgnoredToken {
    /// Token text with surrounding whitespace removed
    pub token: String,
    pub reason: IgnoreReason,
}

/// Parsed page set together with the tokens that were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PageSelection {
    /// Distinct 1-based page numbers, ascending
    pub pages: Vec<u32>,
    /// Non-blank tokens that contributed no pages, in input order
    pub ignored: Vec<IgnoredToken>,
}

/// Read the integer at the start of `s`.
///
/// Leading whitespace is skipped and an optional `+`/`-` sign is accepted.
/// Base-10 digits are consumed until the first non-digit; everything after
/// that is ignored, so `"3abc"` reads as 3. Returns `None` when no digit
/// follows. Values too large for `i64` saturate.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest.as_bytes()[..digits].iter().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// One comma-separated unit of an expression, resolved against the page count
enum Token {
    /// Inclusive span of valid pages, walked in `forward` direction
    Pages { first: u32, last: u32, forward: bool },
    Ignored(IgnoreReason),
}

fn classify(token: &str, max_pages: u32) -> Token {
    // Only the text between the first and second dash counts as the upper
    // bound, so "1-2-3" is read as "1-2".
    let mut parts = token.split('-');
    let head = parts.next().unwrap_or_default();

    let (low, high, forward) = match parts.next() {
        Some(tail) => match (parse_leading_int(head), parse_leading_int(tail)) {
            (Some(a), Some(b)) => (a.min(b), a.max(b), a <= b),
            _ => return Token::Ignored(IgnoreReason::NotANumber),
        },
        None => match parse_leading_int(head) {
            Some(n) if n < 1 || n > i64::from(max_pages) => {
                return Token::Ignored(IgnoreReason::OutOfRange)
            }
            Some(n) => (n, n, true),
            None => return Token::Ignored(IgnoreReason::NotANumber),
        },
    };

    let first = low.max(1);
    let last = high.min(i64::from(max_pages));
    if first > last {
        return Token::Ignored(IgnoreReason::OutOfRange);
    }

    // Both bounds now lie in 1..=max_pages.
    Token::Pages {
        first: first as u32,
        last: last as u32,
        forward,
    }
}

fn tokens(expression: &str) -> impl Iterator<Item = &str> {
    expression
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Parse a page range string (e.g., "1-5,10,15-20") into distinct pages.
///
/// Reversed ranges are accepted (`"5-2"` is pages 2 through 5), range ends
/// are clamped to `1..=max_pages`, and malformed or out-of-range tokens are
/// skipped. The result is sorted ascending and never fails; an empty result
/// is left for the caller to interpret.
pub fn parse_page_range(expression: &str, max_pages: u32) -> Vec<u32> {
    parse_page_selection(expression, max_pages).pages
}

/// Same as [`parse_page_range`], but also reports which tokens were dropped.
pub fn parse_page_selection(expression: &str, max_pages: u32) -> PageSelection {
    let mut pages = BTreeSet::new();
    let mut ignored = Vec::new();

    for token in tokens(expression) {
        match classify(token, max_pages) {
            Token::Pages { first, last, .. } => pages.extend(first..=last),
            Token::Ignored(reason) => ignored.push(IgnoredToken {
                token: token.to_string(),
                reason,
            }),
        }
    }

    PageSelection {
        pages: pages.into_iter().collect(),
        ignored,
    }
}

/// Parse an expression as a page order rather than a page set.
///
/// Uses the same token grammar, clamping and leniency as
/// [`parse_page_range`], but pages come out in the order they are written.
/// A reversed range such as `"5-2"` walks downward. Pages named more than
/// once keep their first position.
pub fn parse_page_order(expression: &str, max_pages: u32) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();

    for token in tokens(expression) {
        if let Token::Pages {
            first,
            last,
            forward,
        } = classify(token, max_pages)
        {
            let span: Box<dyn Iterator<Item = u32>> = if forward {
                Box::new(first..=last)
            } else {
                Box::new((first..=last).rev())
            };
            order.extend(span.filter(|page| seen.insert(*page)));
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1-3,2,3", 5, vec![1, 2, 3])]
    #[case("", 5, vec![])]
    #[case("   ", 5, vec![])]
    #[case("5-2", 10, vec![2, 3, 4, 5])]
    #[case("1-100", 5, vec![1, 2, 3, 4, 5])]
    #[case("abc,2", 5, vec![2])]
    #[case("0,6,3", 5, vec![3])]
    #[case(" 1 - 3 , 5 ", 5, vec![1, 2, 3, 5])]
    #[case("1-3,5,7", 10, vec![1, 2, 3, 5, 7])]
    #[case("2,4-6", 6, vec![2, 4, 5, 6])]
    #[case("10-20", 5, vec![])]
    #[case("7,1,4", 10, vec![1, 4, 7])]
    #[case("0-2", 5, vec![1, 2])]
    #[case("4-9", 5, vec![4, 5])]
    #[case("1-", 5, vec![])]
    #[case("-3", 5, vec![])]
    #[case("1,,2,", 5, vec![1, 2])]
    #[case("3abc", 5, vec![3])]
    #[case("2x-4y", 5, vec![2, 3, 4])]
    #[case("1-2-5", 5, vec![1, 2])]
    #[case("+2", 5, vec![2])]
    #[case("99999999999999999999", 5, vec![])]
    #[case("1-99999999999999999999", 3, vec![1, 2, 3])]
    fn test_parse_page_range(#[case] input: &str, #[case] max: u32, #[case] expected: Vec<u32>) {
        assert_eq!(parse_page_range(input, max), expected);
    }

    #[test]
    fn test_parse_page_range_zero_pages() {
        assert!(parse_page_range("1-3,5", 0).is_empty());
        assert!(parse_page_range("", 0).is_empty());
    }

    #[test]
    fn test_parse_page_range_output_invariants() {
        let inputs = ["9,1-4,3,2-8", "5-1,1-5", "x,12,0-0,3-3", "100-1"];
        for input in inputs {
            let pages = parse_page_range(input, 7);
            assert!(pages.iter().all(|p| (1..=7).contains(p)), "{input}");
            assert!(pages.windows(2).all(|w| w[0] < w[1]), "{input}");
        }
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("  7", Some(7))]
    #[case("3abc", Some(3))]
    #[case("+5", Some(5))]
    #[case("-5", Some(-5))]
    #[case("12 34", Some(12))]
    #[case("007", Some(7))]
    #[case("", None)]
    #[case("abc", None)]
    #[case("-", None)]
    #[case("+ 1", None)]
    #[case("99999999999999999999", Some(i64::MAX))]
    fn test_parse_leading_int(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_leading_int(input), expected);
    }

    #[test]
    fn test_parse_page_selection_reports_ignored_tokens() {
        let selection = parse_page_selection("1-2, abc ,9,,x-3,4", 5);
        assert_eq!(selection.pages, vec![1, 2, 4]);
        assert_eq!(
            selection.ignored,
            vec![
                IgnoredToken {
                    token: "abc".to_string(),
                    reason: IgnoreReason::NotANumber,
                },
                IgnoredToken {
                    token: "9".to_string(),
                    reason: IgnoreReason::OutOfRange,
                },
                IgnoredToken {
                    token: "x-3".to_string(),
                    reason: IgnoreReason::NotANumber,
                },
            ]
        );
    }

    #[test]
    fn test_parse_page_selection_range_outside_document() {
        let selection = parse_page_selection("10-20", 5);
        assert!(selection.pages.is_empty());
        assert_eq!(selection.ignored[0].reason, IgnoreReason::OutOfRange);
    }

    #[test]
    fn test_parse_page_selection_clean_input() {
        let selection = parse_page_selection("1-3", 3);
        assert_eq!(selection.pages, vec![1, 2, 3]);
        assert!(selection.ignored.is_empty());
    }

    #[rstest]
    #[case("3,1,2", 5, vec![3, 1, 2])]
    #[case("5-2", 5, vec![5, 4, 3, 2])]
    #[case("2,1-3", 5, vec![2, 1, 3])]
    #[case("4,abc,9,1", 5, vec![4, 1])]
    #[case("8-3", 5, vec![5, 4, 3])]
    #[case("", 5, vec![])]
    fn test_parse_page_order(#[case] input: &str, #[case] max: u32, #[case] expected: Vec<u32>) {
        assert_eq!(parse_page_order(input, max), expected);
    }
}
