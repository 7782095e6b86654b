//! Natural ("human") ordering of names
//!
//! A name is split into alternating runs of text and digits. Digit runs
//! compare by numeric value, text runs compare case-insensitively, so
//! `Episode 2` sorts before `Episode 10` and `a` before `B`.

use std::cmp::Ordering;

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Sort key for natural ordering.
///
/// Segments alternate text, number, text, ... and always start with a
/// (possibly empty) text segment, so two keys line up position by position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Segment>);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Text(String),
    Number(NumericRun),
}

/// A run of decimal digits, stored without leading zeros as ASCII.
/// Field order matters: a shorter run is a smaller number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NumericRun {
    len: usize,
    digits: String,
}

impl NumericRun {
    fn parse(run: &str) -> Self {
        let ascii: String = run
            .chars()
            .map(|c| char::from(b'0' + digit_value(c) as u8))
            .collect();
        let digits = ascii.trim_start_matches('0').to_string();
        Self {
            len: digits.len(),
            digits,
        }
    }
}

/// Build the natural sort key for a name
pub fn natural_key(name: &str) -> NaturalKey {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in regex!(r"\d+").find_iter(name) {
        segments.push(Segment::Text(name[last..m.start()].to_lowercase()));
        segments.push(Segment::Number(NumericRun::parse(m.as_str())));
        last = m.end();
    }
    segments.push(Segment::Text(name[last..].to_lowercase()));
    NaturalKey(segments)
}

/// Total natural order. Names with equal keys (`01` and `1`, `a` and `A`)
/// fall back to plain string order so the result never depends on the
/// order the names came in.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}

/// Sort names in place in natural order
pub fn sort_natural(names: &mut [String]) {
    names.sort_by_cached_key(|n| (natural_key(n), n.clone()));
}

fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    let mut buf = [0u8; 4];
    regex!(r"^\d$").is_match(c.encode_utf8(&mut buf))
}

/// Decimal value of a digit character.
///
/// Unicode assigns every set of decimal digits a contiguous block that
/// starts at zero, so the value is the distance to the start of the block.
fn digit_value(c: char) -> u32 {
    if let Some(d) = c.to_digit(10) {
        return d;
    }
    let mut zero = c as u32;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        zero -= 1;
    }
    (c as u32 - zero) % 10
}
