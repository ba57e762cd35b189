// 💰 Money Extractor - Salary mention parsing
// Heuristic extraction of monetary amounts from free-text job postings

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Currency of an extracted amount. Postings on Singapore job boards quote
/// in SGD whether or not they say so ("$", "S$", "SGD" all mean the same).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Sgd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Sgd => "SGD",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Sgd
    }
}

/// MoneyMention - Output of extract_money()
///
/// A salary figure or range located in free text. The "not found" state is
/// both bounds `None` with confidence 0.0 — never a zero-valued guess.
///
/// Invariant: when both bounds are set, `low <= high` (reversed input pairs
/// are swapped at construction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyMention {
    /// Lower bound in whole dollars
    pub low: Option<u32>,
    /// Upper bound in whole dollars (equals `low` for single figures)
    pub high: Option<u32>,
    /// Currency unit (implied SGD unless stated)
    pub currency: Currency,
    /// Extraction confidence (0.0 - 1.0); 0.0 means no mention found
    pub confidence: f64,
}

/// Confidence assigned to matches carrying an explicit currency marker
pub const EXPLICIT_CONFIDENCE: f64 = 0.9;

/// Confidence assigned to bare figures rescued by a framing keyword
pub const FRAMED_CONFIDENCE: f64 = 0.5;

impl MoneyMention {
    /// The "no mention found" result
    pub fn none() -> Self {
        MoneyMention {
            low: None,
            high: None,
            currency: Currency::Sgd,
            confidence: 0.0,
        }
    }

    /// A single figure (low == high)
    pub fn single(amount: u32, confidence: f64) -> Self {
        MoneyMention {
            low: Some(amount),
            high: Some(amount),
            currency: Currency::Sgd,
            confidence,
        }
    }

    /// A (low, high) pair. Reversed pairs are swapped to keep low <= high.
    pub fn range(low: u32, high: u32, confidence: f64) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        MoneyMention {
            low: Some(low),
            high: Some(high),
            currency: Currency::Sgd,
            confidence,
        }
    }

    /// Whether any mention was found
    pub fn found(&self) -> bool {
        self.low.is_some()
    }

    /// Mean of the two bounds (integer), if found.
    /// Widened to u64 so bounds near u32::MAX cannot overflow the sum.
    pub fn mean(&self) -> Option<u32> {
        match (self.low, self.high) {
            (Some(low), Some(high)) => Some(((low as u64 + high as u64) / 2) as u32),
            _ => None,
        }
    }
}

impl Default for MoneyMention {
    fn default() -> Self {
        MoneyMention::none()
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Keywords that frame a bare figure as monetary ("salary of 1,500")
const FRAMING_KEYWORDS: &[&str] = &["salary", "pay", "wage", "remuneration"];

/// Tokens scanned either side of an anchor when rescuing bare figures
const SCAN_WINDOW: usize = 5;

/// Floor applied to unmarked figures so years and ages are not read as pay
const MIN_PLAUSIBLE_AMOUNT: u32 = 100;

/// Range separators that may stand alone between two figure tokens
const RANGE_SEPARATORS: &[&str] = &["-", "–", "—", "to"];

/// Scan free text for a salary mention and normalize it to numeric bounds.
///
/// Precedence, highest first:
/// 1. leftmost token with an explicit marker: "$" prefix or "k" suffix
///    ("$3,000", "3k-5k", "$3000 - $5000", "3k to 5k");
/// 2. bare figures within a few tokens of "SGD"/"S$" ("20 - 50 SGD / Month");
/// 3. bare figures within a few tokens of a framing keyword ("salary",
///    "pay", ...), subject to a plausibility floor.
///
/// Purely numeric text with no currency context and no framing keyword is
/// excluded. Never fails: unparseable input yields `MoneyMention::none()`.
pub fn extract_money(text: &str) -> MoneyMention {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    // Pass 1: explicit currency markers, leftmost match wins
    for (i, token) in tokens.iter().enumerate() {
        if let Some((low, high)) = money_from_token(token) {
            if low != high {
                return MoneyMention::range(low, high, EXPLICIT_CONFIDENCE);
            }
            // Single figure so far; a separator token may extend it rightward
            if let Some(upper) = range_continuation(&tokens, i) {
                return MoneyMention::range(low, upper, EXPLICIT_CONFIDENCE);
            }
            return MoneyMention::single(low, EXPLICIT_CONFIDENCE);
        }
    }

    // Pass 2: bare figures adjacent to an explicit currency token
    if let Some(mention) = window_scan(&tokens, &["sgd", "s$"], 0, EXPLICIT_CONFIDENCE) {
        return mention;
    }

    // Pass 3: bare figures adjacent to a monetary framing keyword
    if let Some(mention) = window_scan(
        &tokens,
        FRAMING_KEYWORDS,
        MIN_PLAUSIBLE_AMOUNT,
        FRAMED_CONFIDENCE,
    ) {
        return mention;
    }

    MoneyMention::none()
}

/// Look for anchor tokens and rescue the first figure in a window around
/// each. Figures below `floor` are skipped.
fn window_scan(
    tokens: &[&str],
    anchors: &[&str],
    floor: u32,
    confidence: f64,
) -> Option<MoneyMention> {
    for (i, token) in tokens.iter().enumerate() {
        if !anchors.iter().any(|anchor| token.contains(anchor)) {
            continue;
        }

        let left = i.saturating_sub(SCAN_WINDOW);
        let right = (i + 1 + SCAN_WINDOW).min(tokens.len());
        for j in left..right {
            if j == i {
                continue;
            }
            let (low, high) = match bare_from_token(tokens[j]) {
                Some(pair) => pair,
                None => continue,
            };
            if low < floor {
                continue;
            }
            if low != high {
                return Some(MoneyMention::range(low, high, confidence));
            }
            if let Some(upper) = range_continuation(tokens, j) {
                return Some(MoneyMention::range(low, upper, confidence));
            }
            return Some(MoneyMention::single(low, confidence));
        }
    }
    None
}

/// "3,000 - 5,000" / "3k to 5k": given a figure at `i`, check whether the
/// next token is a range separator followed by a parseable upper bound.
fn range_continuation(tokens: &[&str], i: usize) -> Option<u32> {
    if i + 2 >= tokens.len() || !RANGE_SEPARATORS.contains(&tokens[i + 1]) {
        return None;
    }
    money_from_word(tokens[i + 2]).or_else(|| numeric_from_word(tokens[i + 2]))
}

// ============================================================================
// TOKEN-LEVEL PARSING
// ============================================================================

/// Parse one whitespace token as an explicitly marked amount or inline range.
///
/// Handles "$3,000", "12k", "3k-5k" and "$3,000-$5,000". At least one side of
/// an inline range must carry a marker; the other may be a bare number
/// ("3000-5k"). Returns (low, high); single figures give low == high.
pub fn money_from_token(token: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = token.split(['-', '–', '—']).collect();
    if parts.len() == 2 {
        let first = money_from_word(parts[0]);
        let second = money_from_word(parts[1]);
        // A half-marked range only counts when the bare side is itself a
        // plausible amount; the marker does not distribute, so "3-5k" must
        // not read as a $3 lower bound
        let (low, high) = match (first, second) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => (a, plausible_bare(parts[1])?),
            (None, Some(b)) => (plausible_bare(parts[0])?, b),
            (None, None) => return None,
        };
        return Some((low, high));
    }
    let amount = money_from_word(token)?;
    Some((amount, amount))
}

/// Parse a single word as a marked money amount.
///
/// Two forms qualify: a "$"-carrying word ("$3,000", "s$4500", "$3.5k") and a
/// trailing-k word ("12k", "3.5k,"). Anything else is not a money word.
pub fn money_from_word(word: &str) -> Option<u32> {
    let lower = word.trim().to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let (digits, kmultiply) = match chars.iter().rposition(|&c| c == '$') {
        // "$" with nothing after it is a stray symbol, not an amount
        Some(pos) if pos == chars.len() - 1 => return None,
        Some(pos) => {
            let mut end = pos + 1;
            while end < chars.len() && is_figure_char(chars[end]) {
                end += 1;
            }
            let kmultiply = end < chars.len() && chars[end] == 'k';
            (&chars[pos + 1..end], kmultiply)
        }
        None => {
            // No dollar sign: only the trailing-k form qualifies
            let mut end = chars.len();
            while end > 0 && matches!(chars[end - 1], '.' | ',' | ';' | ')') {
                end -= 1;
            }
            if end == 0 || chars[end - 1] != 'k' {
                return None;
            }
            let mut start = end - 1;
            while start > 0 && is_figure_char(chars[start - 1]) {
                start -= 1;
            }
            (&chars[start..end - 1], true)
        }
    };

    parse_amount(digits, kmultiply)
}

/// Bare side of a half-marked range, held to the plausibility floor
fn plausible_bare(word: &str) -> Option<u32> {
    numeric_from_word(word).filter(|&amount| amount >= MIN_PLAUSIBLE_AMOUNT)
}

/// Parse a bare figure or inline bare range ("3000", "1,500", "2,000-3,000").
/// Only meaningful inside a currency/framing window.
fn bare_from_token(token: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = token.split(['-', '–', '—']).collect();
    if parts.len() == 2 {
        let low = numeric_from_word(parts[0])?;
        let high = numeric_from_word(parts[1])?;
        return Some((low, high));
    }
    let amount = numeric_from_word(token)?;
    Some((amount, amount))
}

/// Parse a bare number token, tolerating thousand separators, a trailing-k
/// multiplier and trailing punctuation. Not money on its own — callers decide
/// from surrounding context.
pub fn numeric_from_word(word: &str) -> Option<u32> {
    let lower = word.trim().to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    let mut end = chars.len();
    while end > 0 && matches!(chars[end - 1], '.' | ',' | ';' | ')') {
        end -= 1;
    }
    if end == 0 {
        return None;
    }

    let (body, kmultiply) = if chars[end - 1] == 'k' {
        (&chars[..end - 1], true)
    } else {
        (&chars[..end], false)
    };

    if body.is_empty() || !body.iter().all(|&c| is_figure_char(c)) {
        return None;
    }
    parse_amount(body, kmultiply)
}

fn is_figure_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

/// Strip separators and parse, applying the thousands multiplier
fn parse_amount(digits: &[char], kmultiply: bool) -> Option<u32> {
    let cleaned: String = digits.iter().filter(|&&c| c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: f64 = cleaned.parse().ok()?;
    let value = if kmultiply { value * 1000.0 } else { value };
    if !(0.0..=u32::MAX as f64).contains(&value) {
        return None;
    }
    Some(value as u32)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_symbol_range() {
        let mention = extract_money("$3,000 - $5,000");
        assert_eq!(mention.low, Some(3000));
        assert_eq!(mention.high, Some(5000));
        assert_eq!(mention.confidence, EXPLICIT_CONFIDENCE);
    }

    #[test]
    fn test_k_range_with_to_separator() {
        let mention = extract_money("3k to 5k");
        assert_eq!(mention.low, Some(3000));
        assert_eq!(mention.high, Some(5000));
    }

    #[test]
    fn test_inline_k_range() {
        let mention = extract_money("earn 3k-5k monthly");
        assert_eq!(mention.low, Some(3000));
        assert_eq!(mention.high, Some(5000));
    }

    #[test]
    fn test_single_figure() {
        let mention = extract_money("basic $3000 plus commission");
        assert_eq!(mention.low, Some(3000));
        assert_eq!(mention.high, Some(3000));
        assert!(mention.found());
    }

    #[test]
    fn test_no_mention_found() {
        let mention = extract_money("no pay info");
        assert!(!mention.found());
        assert_eq!(mention.low, None);
        assert_eq!(mention.high, None);
        assert_eq!(mention.confidence, 0.0);
    }

    #[test]
    fn test_no_digits_no_currency() {
        assert!(!extract_money("great working environment").found());
        assert!(!extract_money("").found());
    }

    #[test]
    fn test_sgd_keyword_rescues_bare_range() {
        let mention = extract_money("20 - 50 SGD / Month");
        assert_eq!(mention.low, Some(20));
        assert_eq!(mention.high, Some(50));
        assert_eq!(mention.confidence, EXPLICIT_CONFIDENCE);
    }

    #[test]
    fn test_framing_keyword_rescues_bare_range() {
        let mention = extract_money("salary 1,200 - 1,500 depending on experience");
        assert_eq!(mention.low, Some(1200));
        assert_eq!(mention.high, Some(1500));
        assert_eq!(mention.confidence, FRAMED_CONFIDENCE);
    }

    #[test]
    fn test_unframed_number_excluded() {
        // A year with no monetary context must not be read as a salary
        assert!(!extract_money("established in 2019").found());
    }

    #[test]
    fn test_framed_small_number_excluded() {
        // Ages and headcounts near "pay" stay below the plausibility floor
        assert!(!extract_money("pay review at 21").found());
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let mention = extract_money("$5,000 - $3,000");
        assert_eq!(mention.low, Some(3000));
        assert_eq!(mention.high, Some(5000));
    }

    #[test]
    fn test_leftmost_explicit_match_wins() {
        let mention = extract_money("allowance $500, salary 4,000");
        assert_eq!(mention.low, Some(500));
        assert_eq!(mention.confidence, EXPLICIT_CONFIDENCE);
    }

    #[test]
    fn test_low_high_invariant() {
        let mention = extract_money("$2,500 - $4,800");
        let (low, high) = (mention.low.unwrap(), mention.high.unwrap());
        assert!(low <= high);
    }

    #[test]
    fn test_half_marked_inline_range_rejected() {
        // The "k" does not distribute leftward; a $3 lower bound is noise
        assert!(!extract_money("3-5k").found());
        assert_eq!(money_from_token("3-5k"), None);
        assert_eq!(money_from_token("3k-5"), None);
        // A marked side with a plausible bare side still reads as a range
        assert_eq!(money_from_token("$3,000-5,000"), Some((3000, 5000)));
    }

    #[test]
    fn test_mean_does_not_overflow_on_large_bounds() {
        let mention = MoneyMention::range(u32::MAX, u32::MAX, EXPLICIT_CONFIDENCE);
        assert_eq!(mention.mean(), Some(u32::MAX));

        let mention = extract_money("$4,294,967,295 - $4,294,967,295");
        assert_eq!(mention.low, Some(u32::MAX));
        assert_eq!(mention.mean(), Some(u32::MAX));
    }

    #[test]
    fn test_money_from_word_forms() {
        assert_eq!(money_from_word("$3,000"), Some(3000));
        assert_eq!(money_from_word("$3,000."), Some(3000));
        assert_eq!(money_from_word("12k"), Some(12000));
        assert_eq!(money_from_word("$3.5k"), Some(3500));
        assert_eq!(money_from_word("s$4500"), Some(4500));
        assert_eq!(money_from_word("$"), None);
        assert_eq!(money_from_word("work"), None);
        assert_eq!(money_from_word("ok,"), None);
        assert_eq!(money_from_word(""), None);
    }

    #[test]
    fn test_numeric_from_word_forms() {
        assert_eq!(numeric_from_word("3000"), Some(3000));
        assert_eq!(numeric_from_word("1,500"), Some(1500));
        assert_eq!(numeric_from_word("5k"), Some(5000));
        assert_eq!(numeric_from_word("abc"), None);
        assert_eq!(numeric_from_word("3000a"), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(extract_money("$3,000 - $5,000").mean(), Some(4000));
        assert_eq!(MoneyMention::none().mean(), None);
    }

    #[test]
    fn test_currency_label() {
        let mention = extract_money("$2,000");
        assert_eq!(mention.currency.as_str(), "SGD");
    }
}
