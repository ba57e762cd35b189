// 🎓 Categorical Normalizer - shared heuristics ("common" module)
// Maps free-text job-requirement fields onto small fixed enumerations,
// plus the text-cleaning helpers every transformer runs first

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::money::money_from_token;
use crate::rules::{KeywordRule, MatchKind, RuleSet};

// ============================================================================
// EDUCATION TYPES
// ============================================================================

/// Detailed education qualification unit, as detected in text.
/// Ordered: Degree is the highest qualification, Primary the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Qualification {
    Primary,
    Secondary,
    Ite,
    Diploma,
    Degree,
}

/// Version of the qualification-to-label mapping. Primary and secondary were
/// historically reported as separate levels; the canonical form collapses
/// them into one bucket. Both stay testable against the same scan logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingVersion {
    Legacy,
    Canonical,
}

impl Qualification {
    /// Label under the given mapping version
    pub fn label(&self, version: MappingVersion) -> &'static str {
        match (self, version) {
            (Qualification::Primary, MappingVersion::Legacy) => "primary",
            (Qualification::Secondary, MappingVersion::Legacy) => "secondary",
            (Qualification::Primary, MappingVersion::Canonical)
            | (Qualification::Secondary, MappingVersion::Canonical) => "primary/secondary",
            (Qualification::Ite, _) => "ITE",
            (Qualification::Diploma, _) => "diploma",
            (Qualification::Degree, _) => "degree",
        }
    }
}

/// Canonical coarse bucket for required educational qualification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    Degree,
    Diploma,
    Ite,
    PrimaryOrSecondary,
    Unknown,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Degree => "degree",
            EducationLevel::Diploma => "diploma",
            EducationLevel::Ite => "ITE",
            EducationLevel::PrimaryOrSecondary => "primary/secondary",
            EducationLevel::Unknown => "unknown",
        }
    }

    /// Canonical collapsing of a detailed qualification
    pub fn from_qualification(qualification: Qualification) -> Self {
        match qualification {
            Qualification::Degree => EducationLevel::Degree,
            Qualification::Diploma => EducationLevel::Diploma,
            Qualification::Ite => EducationLevel::Ite,
            Qualification::Primary | Qualification::Secondary => {
                EducationLevel::PrimaryOrSecondary
            }
        }
    }
}

// ============================================================================
// EXPERIENCE TYPES
// ============================================================================

/// Canonical coarse bucket for required seniority.
///
/// Only the entry vs. non-entry split is reliable; the finer distinctions
/// among manager/executive/professional are acknowledged coarse and callers
/// should not lean on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    Manager,
    Executive,
    Professional,
    None,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Manager => "manager",
            ExperienceLevel::Executive => "executive",
            ExperienceLevel::Professional => "professional",
            ExperienceLevel::None => "none",
        }
    }
}

// ============================================================================
// RULE TABLES
// ============================================================================

static EDUCATION_RULES: Lazy<RuleSet<Qualification>> = Lazy::new(|| {
    use MatchKind::*;
    use Qualification::*;
    RuleSet::from_rules(vec![
        KeywordRule::new("degree", Degree, 50, Substring),
        KeywordRule::new("bachelor", Degree, 50, Substring),
        KeywordRule::new("college", Degree, 50, Substring),
        KeywordRule::new("diploma", Diploma, 40, Substring),
        KeywordRule::new("ITE", Ite, 30, CaseSensitive),
        KeywordRule::new("nitec", Ite, 30, Substring),
        // Anchor method for primary/secondary: "primary duties" and the like
        // are about the role, not about schooling
        KeywordRule::new("secondary", Secondary, 20, AnchoredToken),
        KeywordRule::new("o-level", Secondary, 20, Substring),
        KeywordRule::new("n-level", Secondary, 20, Substring),
        KeywordRule::new("primary", Primary, 10, AnchoredToken),
    ])
});

// Minimum-seniority-first ordering: a posting listing several levels is
// assumed open at the most junior one mentioned
static EXPERIENCE_RULES: Lazy<RuleSet<ExperienceLevel>> = Lazy::new(|| {
    use ExperienceLevel::*;
    use MatchKind::*;
    RuleSet::from_rules(vec![
        KeywordRule::new("entry", Entry, 40, Substring),
        KeywordRule::new("junior", Entry, 40, Substring),
        KeywordRule::new("no experience", Entry, 40, Substring),
        KeywordRule::new("manager", Manager, 30, Substring),
        KeywordRule::new("head of", Manager, 30, Substring),
        KeywordRule::new("senior", Professional, 20, Substring),
        KeywordRule::new("specialist", Professional, 20, Substring),
        KeywordRule::new("director", Executive, 10, Substring),
        KeywordRule::new("VP", Executive, 10, CaseSensitive),
        KeywordRule::new("chief", Executive, 10, Substring),
    ])
});

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Detect every education qualification mentioned in the text.
/// Money-like tokens are stripped first so "$3,000" never reaches the
/// keyword scan.
pub fn detect_qualifications(text: &str) -> Vec<Qualification> {
    let cleaned = strip_money_tokens(text);
    EDUCATION_RULES.matches(&cleaned)
}

/// Highest qualification in a list (degree > diploma > ITE > secondary > primary)
pub fn highest_qualification(qualifications: &[Qualification]) -> Option<Qualification> {
    qualifications.iter().copied().max()
}

/// Lowest qualification in a list
pub fn lowest_qualification(qualifications: &[Qualification]) -> Option<Qualification> {
    qualifications.iter().copied().min()
}

/// Map free text onto the canonical education bucket.
///
/// When several levels are mentioned the highest wins, matching the
/// intuition that postings list the maximum required qualification.
/// No match (including empty input) gives `Unknown`.
pub fn normalize_education(text: &str) -> EducationLevel {
    match highest_qualification(&detect_qualifications(text)) {
        Some(qualification) => EducationLevel::from_qualification(qualification),
        None => EducationLevel::Unknown,
    }
}

/// Map free text onto the canonical experience bucket.
///
/// Minimum-seniority-first rule order, so "Senior Manager" reads as Manager.
/// No match gives `ExperienceLevel::None`.
pub fn normalize_experience(text: &str) -> ExperienceLevel {
    let cleaned = strip_money_tokens(text);
    EXPERIENCE_RULES
        .classify(&cleaned)
        .unwrap_or(ExperienceLevel::None)
}

/// Most junior level present in a list, checked in fixed order
/// (entry, then manager, professional, executive). Empty list gives `None`.
pub fn minimum_experience_level(levels: &[ExperienceLevel]) -> ExperienceLevel {
    for candidate in [
        ExperienceLevel::Entry,
        ExperienceLevel::Manager,
        ExperienceLevel::Professional,
        ExperienceLevel::Executive,
    ] {
        if levels.contains(&candidate) {
            return candidate;
        }
    }
    ExperienceLevel::None
}

/// Remove whitespace tokens that parse as money amounts ("$3,000", "3k-5k")
/// so salary figures never collide with keyword scans.
pub fn strip_money_tokens(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| money_from_token(token).is_none())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// YEARS OF EXPERIENCE
// ============================================================================

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Minimum years of experience required, read from the token just before a
/// "year(s) experience" anchor: a plain number, an "x-y" range (integer
/// mean), or a written number one..nine. 0 when no anchor is found.
pub fn minimum_years_experience(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let pos = lower
        .find("year experience")
        .or_else(|| lower.find("years experience"));
    let pos = match pos {
        Some(p) if p > 0 => p,
        _ => return 0,
    };

    let prefix = lower[..pos].trim_end();
    let word = match prefix.split_whitespace().last() {
        Some(w) => w,
        None => return 0,
    };

    if let Ok(n) = word.parse::<u32>() {
        return n;
    }
    if let Some((a, b)) = word.split_once('-') {
        if let (Ok(a), Ok(b)) = (a.parse::<u32>(), b.parse::<u32>()) {
            return (a + b) / 2;
        }
        return 1;
    }
    word_number(word)
}

fn word_number(word: &str) -> u32 {
    match NUMBER_WORDS.iter().position(|&w| w == word) {
        Some(i) => i as u32 + 1,
        None => 0,
    }
}

// ============================================================================
// SHIFT WORK / ENGINEERING FLAGS
// ============================================================================

/// Indicative words looked for near a "shift" anchor
const SHIFT_ANCHORS: &[&str] = &[
    "shifts", "rotat", "work", "time", "closing", "night", "morning", "duties", "start", "end",
    "based", "throughout", "team", "roster", "transport", "timing", "allowance", "hour", "each",
    "split", "depending",
];

const SHIFT_ENDINGS: &[&str] = &["am", "pm"];

/// Whether the description is indicative of shift work: a "shift" token with
/// an indicative word in a 7-token window, or at least two "shift" mentions.
pub fn is_shift_work(text: &str) -> bool {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let mut count = 0;
    for (i, token) in tokens.iter().enumerate() {
        if !token.contains("shift") {
            continue;
        }
        count += 1;

        let left = i.saturating_sub(3);
        let right = (i + 4).min(tokens.len());
        let window = &tokens[left..right];

        if window
            .iter()
            .any(|t| SHIFT_ANCHORS.iter().any(|anchor| t.contains(anchor)))
        {
            return true;
        }
        if window
            .iter()
            .any(|t| SHIFT_ENDINGS.iter().any(|ending| t.ends_with(ending)))
        {
            return true;
        }
        if count >= 2 {
            return true;
        }
    }

    false
}

const ENGINEERING_TITLE_MARKERS: &[&str] = &[
    "engine", "technic", "mechanic", "chemical", "aero", "electronic", "logistic", "process",
];

const ENGINEERING_DESCRIPTION_MARKERS: &[&str] = &[
    "engine", "technic", "mechanic", "chemical", "aero", "electronic", "logistic",
];

const ENGINEERING_ANTI_MARKERS: &[&str] = &["software engine"];

/// Whether a posting is for an engineering role. Software engineering is
/// deliberately excluded.
pub fn is_engineering(title: &str, description: &str) -> bool {
    let title = title.to_lowercase();
    let description = description.to_lowercase();

    let contains_any = |text: &str, markers: &[&str]| markers.iter().any(|m| text.contains(m));

    if contains_any(&title, ENGINEERING_ANTI_MARKERS)
        || contains_any(&description, ENGINEERING_ANTI_MARKERS)
    {
        return false;
    }

    contains_any(&title, ENGINEERING_TITLE_MARKERS)
        || contains_any(&description, ENGINEERING_DESCRIPTION_MARKERS)
}

// ============================================================================
// TEXT CLEANUP
// ============================================================================

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("html tag pattern"));

/// Strip HTML tags and collapse runs of whitespace
pub fn clean_html(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop characters outside the ASCII-printable range and trim
pub fn clean_non_ascii(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii() && (c.is_ascii_graphic() || c.is_ascii_whitespace()))
        .collect::<String>()
        .trim()
        .to_string()
}

// ============================================================================
// TESTS
// ============================================================================
