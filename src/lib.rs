// sgjobutils - Heuristic text-extraction utilities for Singapore job postings
// Exposes all modules for use by scrapers, pipelines and tests

pub mod common; // Categorical normalizers (education, experience) + text cleanup
pub mod industry; // SSIC industry-code mapping tables
pub mod money; // Salary/money mention extraction
pub mod rules; // Ordered keyword rule tables
pub mod skills; // Skill ranking helpers
pub mod transform; // Source-row transformers (Jobsbank, FastJobs, JobsCentral)

// Re-export commonly used types and functions
pub use common::{
    clean_html, clean_non_ascii, detect_qualifications, highest_qualification, is_engineering,
    is_shift_work, lowest_qualification, minimum_experience_level, minimum_years_experience,
    normalize_education, normalize_experience, strip_money_tokens, EducationLevel,
    ExperienceLevel, MappingVersion, Qualification,
};
pub use industry::{IndustryEntry, IndustryMapping};
pub use money::{extract_money, Currency, MoneyMention};
pub use rules::{KeywordRule, MatchKind, RuleSet};
pub use skills::{rank_skills, top_skills, Skill};
pub use transform::{
    get_transformer, FastjobsTransformer, JobRecord, JobSource, JobTransformer,
    JobsbankTransformer, JobscentralTransformer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
