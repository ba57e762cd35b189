// 🏷️ Keyword Rules - Rules as Data
// Ordered (pattern, category, priority) tables behind the categorical
// normalizers, evaluated in a single pass so precedence stays auditable

use serde::{Deserialize, Serialize};

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// How a rule pattern is matched against input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Case-insensitive substring match ("diploma" in "Diploma required")
    Substring,

    /// Exact-case substring match, for acronyms that collide with ordinary
    /// words when lowercased ("ITE" vs "site", "VP" vs "vpn")
    CaseSensitive,

    /// Token-level anchor match: some whitespace token must contain the
    /// pattern, and no complement word may appear in a small window around
    /// it. Cuts false positives like "primary responsibilities".
    AnchoredToken,
}

/// Words that disqualify an anchored-token match when found near the anchor.
/// "primary duties" is about the role, not about primary school.
const ANCHOR_COMPLEMENTS: &[&str] = &[
    "responsibilit",
    "duties",
    "role",
    "contact",
    "function",
    "requirement",
    "emphasis",
    "purpose",
];

/// Tokens checked either side of an anchored-token hit
const ANCHOR_WINDOW: usize = 2;

/// One keyword rule: pattern, the category it votes for, and its priority.
/// Higher priority wins ties; rules within a category may share a priority.
#[derive(Debug, Clone)]
pub struct KeywordRule<C> {
    pub pattern: &'static str,
    pub category: C,
    pub priority: i32,
    pub match_kind: MatchKind,
}

impl<C> KeywordRule<C> {
    pub const fn new(
        pattern: &'static str,
        category: C,
        priority: i32,
        match_kind: MatchKind,
    ) -> Self {
        KeywordRule {
            pattern,
            category,
            priority,
            match_kind,
        }
    }

    /// Check whether this rule matches the given text.
    /// `lower` must be the lowercased form of `text` (callers scan many rules
    /// against one string, so the lowering is done once upstream).
    fn matches(&self, text: &str, lower: &str) -> bool {
        match self.match_kind {
            MatchKind::Substring => lower.contains(self.pattern),
            MatchKind::CaseSensitive => text.contains(self.pattern),
            MatchKind::AnchoredToken => anchored_match(lower, self.pattern),
        }
    }
}

/// Anchor method: find a token containing the pattern, then reject the hit
/// if any complement word sits within the surrounding window.
fn anchored_match(lower: &str, pattern: &str) -> bool {
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    for (i, token) in tokens.iter().enumerate() {
        if !token.contains(pattern) {
            continue;
        }

        let left = i.saturating_sub(ANCHOR_WINDOW);
        let right = (i + 1 + ANCHOR_WINDOW).min(tokens.len());
        let disqualified = tokens[left..right].iter().any(|window_token| {
            ANCHOR_COMPLEMENTS
                .iter()
                .any(|complement| window_token.contains(complement))
        });

        // First anchor decides; later mentions are not consulted
        return !disqualified;
    }

    false
}

// ============================================================================
// RULE SET
// ============================================================================

/// An ordered rule list. Rules are sorted by priority (descending) once at
/// construction; classification is a single pass down the sorted list.
#[derive(Debug, Clone)]
pub struct RuleSet<C> {
    rules: Vec<KeywordRule<C>>,
}

impl<C: Copy + PartialEq> RuleSet<C> {
    pub fn from_rules(mut rules: Vec<KeywordRule<C>>) -> Self {
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        RuleSet { rules }
    }

    /// Category of the highest-priority matching rule, if any
    pub fn classify(&self, text: &str) -> Option<C> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(text, &lower))
            .map(|rule| rule.category)
    }

    /// All distinct matching categories, highest priority first
    pub fn matches(&self, text: &str) -> Vec<C> {
        let lower = text.to_lowercase();
        let mut found = Vec::new();
        for rule in &self.rules {
            if found.contains(&rule.category) {
                continue;
            }
            if rule.matches(text, &lower) {
                found.push(rule.category);
            }
        }
        found
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rules() -> RuleSet<&'static str> {
        RuleSet::from_rules(vec![
            KeywordRule::new("degree", "degree", 40, MatchKind::Substring),
            KeywordRule::new("diploma", "diploma", 30, MatchKind::Substring),
            KeywordRule::new("ITE", "ite", 20, MatchKind::CaseSensitive),
            KeywordRule::new("primary", "pri/sec", 10, MatchKind::AnchoredToken),
        ])
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let rules = sample_rules();
        assert_eq!(rules.classify("Diploma holders welcome"), Some("diploma"));
    }

    #[test]
    fn test_priority_orders_ties() {
        let rules = sample_rules();
        // Both degree and diploma match; degree has higher priority
        assert_eq!(
            rules.classify("Bachelor's degree or diploma required"),
            Some("degree")
        );
    }

    #[test]
    fn test_case_sensitive_acronym() {
        let rules = sample_rules();
        assert_eq!(rules.classify("ITE certificate holders"), Some("ite"));
        // Lowercased "ite" inside ordinary words must not match
        assert_eq!(rules.classify("on-site role"), None);
    }

    #[test]
    fn test_anchored_token_accepts_clean_context() {
        let rules = sample_rules();
        assert_eq!(
            rules.classify("minimum primary school education"),
            Some("pri/sec")
        );
    }

    #[test]
    fn test_anchored_token_rejects_complement_context() {
        let rules = sample_rules();
        assert_eq!(rules.classify("your primary duties include cleaning"), None);
        assert_eq!(rules.classify("primary role is to assist"), None);
    }

    #[test]
    fn test_matches_returns_all_in_priority_order() {
        let rules = sample_rules();
        let found = rules.matches("degree or diploma accepted");
        assert_eq!(found, vec!["degree", "diploma"]);
    }

    #[test]
    fn test_no_match() {
        let rules = sample_rules();
        assert_eq!(rules.classify("driving licence required"), None);
        assert!(rules.matches("").is_empty());
    }

    #[test]
    fn test_rule_count() {
        assert_eq!(sample_rules().rule_count(), 4);
        assert_eq!(RuleSet::<&str>::from_rules(vec![]).rule_count(), 0);
    }
}
