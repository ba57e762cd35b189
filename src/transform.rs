// 🏗️ Transformer Framework
// Polymorphic transformers turning raw job-board rows into the standard
// record shape shared by every downstream consumer

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{
    clean_html, clean_non_ascii, detect_qualifications, is_engineering, lowest_qualification,
    minimum_experience_level, minimum_years_experience, normalize_experience, EducationLevel,
    ExperienceLevel,
};
use crate::money::extract_money;

// ============================================================================
// CORE TYPES
// ============================================================================

/// JobSource - Which job board a row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobSource {
    Jobsbank,
    Fastjobs,
    Jobscentral,
}

impl JobSource {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            JobSource::Jobsbank => "Jobsbank",
            JobSource::Fastjobs => "FastJobs",
            JobSource::Jobscentral => "JobsCentral",
        }
    }

    /// Short code stored in the `source` column
    pub fn code(&self) -> &str {
        match self {
            JobSource::Jobsbank => "jobsbank",
            JobSource::Fastjobs => "fastjobs",
            JobSource::Jobscentral => "jobscentral",
        }
    }
}

/// JobRecord - Output of transform()
///
/// The standard row every source is mapped onto:
/// - source_id: unique id (primary key) on the source platform
/// - uen / company_name: UEN number of the offering company, with the plain
///   name as a fallback since not every platform provides UENs
/// - minimum_qualification: lowest education level the posting asks for
/// - experience_level: coarse seniority bucket (entry vs. non-entry is the
///   reliable split)
/// - salary_min/max/avg: advertised bounds in whole dollars, 0 when absent
/// - dates: posting/expiry/last-seen, None when the source omits them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub source_id: String,
    pub title: String,
    pub uen: Option<String>,
    pub company_name: Option<String>,
    pub minimum_qualification: EducationLevel,
    pub experience_level: ExperienceLevel,
    pub minimum_years_experience: u32,
    pub num_vacancies: u32,
    pub salary_min: u32,
    pub salary_max: u32,
    pub salary_avg: u32,
    pub ssoc: Option<u32>,
    pub date_posted: Option<NaiveDate>,
    pub date_expire: Option<NaiveDate>,
    pub date_last_seen: Option<NaiveDate>,
    pub source: JobSource,
    pub description: String,
    pub is_engineering: bool,
}

impl JobRecord {
    /// An empty row with the documented field defaults
    pub fn empty(source: JobSource) -> Self {
        JobRecord {
            source_id: String::new(),
            title: String::new(),
            uen: None,
            company_name: None,
            minimum_qualification: EducationLevel::Unknown,
            experience_level: ExperienceLevel::None,
            minimum_years_experience: 0,
            num_vacancies: 1,
            salary_min: 0,
            salary_max: 0,
            salary_avg: 0,
            ssoc: None,
            date_posted: None,
            date_expire: None,
            date_last_seen: None,
            source,
            description: String::new(),
            is_engineering: false,
        }
    }
}

// ============================================================================
// TRANSFORMER TRAIT + FACTORY
// ============================================================================

/// JobTransformer - Core trait
///
/// One implementation per job board. Adding a board means adding an impl;
/// existing transformers are never touched.
pub trait JobTransformer: Send + Sync {
    /// Map one source row (arbitrary JSON shape) onto the standard record.
    /// Missing required fields are errors; missing optional fields take
    /// the documented defaults.
    fn transform(&self, row: &Value) -> Result<JobRecord>;

    /// The source this transformer handles
    fn source(&self) -> JobSource;

    /// Transformer version (for provenance tracking)
    fn version(&self) -> &str {
        "1.0.0"
    }
}

/// Get the transformer for a source
pub fn get_transformer(source: JobSource) -> Box<dyn JobTransformer> {
    match source {
        JobSource::Jobsbank => Box::new(JobsbankTransformer),
        JobSource::Fastjobs => Box::new(FastjobsTransformer),
        JobSource::Jobscentral => Box::new(JobscentralTransformer),
    }
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

fn required_str<'a>(row: &'a Value, field: &str) -> Result<&'a str> {
    row.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("Missing required field: {}", field))
}

fn optional_str(row: &Value, field: &str) -> Option<String> {
    row.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn optional_u32(row: &Value, field: &str) -> Option<u32> {
    row.get(field).and_then(|v| v.as_u64()).map(|n| n as u32)
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn date_field(row: &Value, field: &str) -> Option<NaiveDate> {
    parse_date(row.get(field).and_then(|v| v.as_str()))
}

/// Integer mean of two salary bounds, widened to u64 so advertised figures
/// near u32::MAX cannot overflow the sum
fn salary_mean(low: u32, high: u32) -> u32 {
    ((low as u64 + high as u64) / 2) as u32
}

/// Lowest qualification mentioned in a description, collapsed to the
/// canonical bucket (transformers report the minimum requirement)
fn minimum_qualification(description: &str) -> EducationLevel {
    match lowest_qualification(&detect_qualifications(description)) {
        Some(qualification) => EducationLevel::from_qualification(qualification),
        None => EducationLevel::Unknown,
    }
}

// ============================================================================
// JOBSBANK
// ============================================================================

pub struct JobsbankTransformer;

impl JobsbankTransformer {
    /// Position-level strings Jobsbank uses, mapped onto the standard buckets
    fn map_position(position: &str) -> ExperienceLevel {
        match position {
            "Fresh/entry level" | "Non-executive" | "Executive" | "Junior Executive" => {
                ExperienceLevel::Entry
            }
            "Senior Executive" => ExperienceLevel::Executive,
            "Manager" | "Middle Management" | "Senior Management" => ExperienceLevel::Manager,
            "Professional" => ExperienceLevel::Professional,
            // Default catch-all
            _ => ExperienceLevel::Manager,
        }
    }
}

impl JobTransformer for JobsbankTransformer {
    fn transform(&self, row: &Value) -> Result<JobRecord> {
        let mut record = JobRecord::empty(JobSource::Jobsbank);

        // Jobsbank splits the posting across two description fields
        let first = clean_non_ascii(&clean_html(
            row.get("description").and_then(|v| v.as_str()).unwrap_or(""),
        ));
        let second = clean_non_ascii(&clean_html(
            row.get("otherRequirements")
                .and_then(|v| v.as_str())
                .unwrap_or(""),
        ));
        let description = format!("{} {}", first, second);

        record.source_id = required_str(row, "uuid")?.to_string();
        record.title = required_str(row, "title")?.to_string();

        if let Some(company) = row.get("postedCompany") {
            record.uen = optional_str(company, "uen");
            record.company_name = optional_str(company, "name");
        }

        record.minimum_qualification = minimum_qualification(&description);

        if let Some(salary) = row.get("salary") {
            if let (Some(minimum), Some(maximum)) = (
                optional_u32(salary, "minimum"),
                optional_u32(salary, "maximum"),
            ) {
                record.salary_min = minimum;
                record.salary_max = maximum;
                record.salary_avg = salary_mean(minimum, maximum);
            }
        }

        record.minimum_years_experience = optional_u32(row, "minimumYearsExperience")
            .unwrap_or_else(|| minimum_years_experience(&description));

        // Most junior advertised position level, with an escalation: "entry"
        // postings asking for 3+ years or paying over 5k are not entry level
        let positions: Vec<ExperienceLevel> = row
            .get("positionLevels")
            .and_then(|v| v.as_array())
            .map(|levels| {
                levels
                    .iter()
                    .filter_map(|entry| entry.get("position").and_then(|v| v.as_str()))
                    .map(Self::map_position)
                    .collect()
            })
            .unwrap_or_default();
        let mut level = minimum_experience_level(&positions);
        if level == ExperienceLevel::Entry
            && (record.minimum_years_experience >= 3 || record.salary_avg > 5000)
        {
            level = ExperienceLevel::Executive;
        }
        record.experience_level = level;

        record.num_vacancies = optional_u32(row, "numberOfVacancies").unwrap_or(1);
        record.ssoc = optional_u32(row, "ssocCode");

        if let Some(metadata) = row.get("metadata") {
            record.date_posted = date_field(metadata, "originalPostingDate");
            record.date_expire = date_field(metadata, "expiryDate");
            // No last-seen signal from the API; expiry is the best stand-in
            record.date_last_seen = record.date_expire;
        }

        record.is_engineering = is_engineering(&record.title, &description);
        record.description = description;

        Ok(record)
    }

    fn source(&self) -> JobSource {
        JobSource::Jobsbank
    }
}

// ============================================================================
// FASTJOBS
// ============================================================================

pub struct FastjobsTransformer;

impl JobTransformer for FastjobsTransformer {
    fn transform(&self, row: &Value) -> Result<JobRecord> {
        let mut record = JobRecord::empty(JobSource::Fastjobs);

        let description = row
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        record.source_id = row
            .get("identifier")
            .and_then(|id| id.get("value"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing required field: identifier.value"))?
            .to_string();
        record.title = required_str(row, "title")?.to_string();

        record.uen = optional_str(row, "uen");
        record.company_name = row
            .get("hiringOrganization")
            .and_then(|org| org.get("name"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        record.minimum_qualification = minimum_qualification(&description);
        record.minimum_years_experience = minimum_years_experience(&description);

        // FastJobs carries no position-level field
        record.experience_level = ExperienceLevel::None;

        // Single advertised figure fills all three salary columns
        let figure = row
            .get("baseSalary")
            .and_then(|s| s.get("value"))
            .and_then(|v| v.get("value"))
            .and_then(|v| v.as_u64())
            .or_else(|| row.get("min_salary").and_then(|v| v.as_u64()));
        if let Some(figure) = figure {
            record.salary_min = figure as u32;
            record.salary_max = figure as u32;
            record.salary_avg = figure as u32;
        }

        record.date_posted = date_field(row, "posted_on");
        record.date_expire = date_field(row, "expiring_on");

        record.is_engineering = is_engineering(&record.title, &description);
        record.description = description;

        Ok(record)
    }

    fn source(&self) -> JobSource {
        JobSource::Fastjobs
    }
}

// ============================================================================
// JOBSCENTRAL
// ============================================================================

pub struct JobscentralTransformer;

impl JobTransformer for JobscentralTransformer {
    fn transform(&self, row: &Value) -> Result<JobRecord> {
        let mut record = JobRecord::empty(JobSource::Jobscentral);

        let description = clean_non_ascii(&clean_html(
            row.get("jobDescription")
                .and_then(|v| v.as_str())
                .unwrap_or(""),
        ));

        record.source_id = required_str(row, "id")?.to_string();
        record.title = required_str(row, "jobTitle")?.to_string();

        // JobsCentral provides no UEN
        record.company_name = optional_str(row, "company");

        record.minimum_qualification = minimum_qualification(&description);
        record.minimum_years_experience = minimum_years_experience(&description);
        record.experience_level = normalize_experience(&description);

        // Salary arrives as free text ("3,000 - 5,600 SGD / Month")
        if let Some(pay) = row.get("payHighLow").and_then(|v| v.as_str()) {
            let mention = extract_money(pay);
            if let (Some(low), Some(high)) = (mention.low, mention.high) {
                record.salary_min = low;
                record.salary_max = high;
                record.salary_avg = salary_mean(low, high);
            }
        }

        record.date_posted = date_field(row, "postingDate");
        record.date_expire = date_field(row, "closingDate");

        record.is_engineering = is_engineering(&record.title, &description);
        record.description = description;

        Ok(record)
    }

    fn source(&self) -> JobSource {
        JobSource::Jobscentral
    }
}

// ============================================================================
// TESTS
// ============================================================================
