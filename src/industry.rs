// 🏭 Industry Mapping - SSIC code lookup
// Maps Singapore Standard Industrial Classification codes onto
// (sector, industry, subindustry) triples loaded from CSV tables

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ============================================================================
// TYPES
// ============================================================================

/// One resolved industry classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryEntry {
    pub sector: String,
    pub industry: String,
    pub subindustry: String,
}

/// SSIC lookup tables. The primary file carries both the 2015 and 2010 code
/// revisions per row; a fallback file maps 2-digit code prefixes for codes
/// neither revision knows.
#[derive(Debug, Clone, Default)]
pub struct IndustryMapping {
    ssic2015: HashMap<String, IndustryEntry>,
    ssic2010: HashMap<String, IndustryEntry>,
    fallback: HashMap<String, IndustryEntry>,
}

// ============================================================================
// LOADING
// ============================================================================

impl IndustryMapping {
    /// Load the primary mapping and the prefix fallback from CSV files
    pub fn from_csv_paths<P: AsRef<Path>>(mapping_path: P, fallback_path: P) -> Result<Self> {
        let mapping_file = File::open(mapping_path.as_ref()).with_context(|| {
            format!(
                "Failed to open industry mapping: {}",
                mapping_path.as_ref().display()
            )
        })?;
        let fallback_file = File::open(fallback_path.as_ref()).with_context(|| {
            format!(
                "Failed to open fallback mapping: {}",
                fallback_path.as_ref().display()
            )
        })?;
        Self::from_readers(mapping_file, fallback_file)
    }

    /// Load from any readers (tests feed in-memory CSV strings)
    pub fn from_readers<R: Read>(mapping: R, fallback: R) -> Result<Self> {
        let mut loaded = IndustryMapping::default();

        // Primary file: sector,industry,subindustry,ssic2010,ssic2015
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(mapping);
        for (line_num, result) in reader.records().enumerate() {
            let record =
                result.with_context(|| format!("Bad industry mapping row {}", line_num + 2))?;

            let entry = IndustryEntry {
                sector: record.get(0).unwrap_or("").to_string(),
                industry: record.get(1).unwrap_or("").to_string(),
                subindustry: record.get(2).unwrap_or("").to_string(),
            };

            let ssic2010 = record.get(3).unwrap_or("");
            let ssic2015 = record.get(4).unwrap_or("");
            if !ssic2010.is_empty() {
                loaded.ssic2010.insert(ssic2010.to_string(), entry.clone());
            }
            if !ssic2015.is_empty() {
                loaded.ssic2015.insert(ssic2015.to_string(), entry);
            }
        }

        // Fallback file: prefix,sector,industry,subindustry
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(fallback);
        for (line_num, result) in reader.records().enumerate() {
            let record =
                result.with_context(|| format!("Bad fallback mapping row {}", line_num + 2))?;

            let prefix = record.get(0).unwrap_or("").trim().to_string();
            let entry = IndustryEntry {
                sector: record.get(1).unwrap_or("").to_string(),
                industry: record.get(2).unwrap_or("").to_string(),
                subindustry: record.get(3).unwrap_or("").to_string(),
            };
            loaded.fallback.insert(prefix, entry);
        }

        Ok(loaded)
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Resolve an SSIC code: 2015 revision first, then 2010, then the
    /// 2-digit prefix fallback. 4-digit codes are zero-padded to 5.
    pub fn lookup(&self, ssic: &str) -> Option<&IndustryEntry> {
        let code = if ssic.len() == 4 {
            format!("0{}", ssic)
        } else {
            ssic.to_string()
        };

        if let Some(entry) = self.ssic2015.get(&code) {
            return Some(entry);
        }
        if let Some(entry) = self.ssic2010.get(&code) {
            return Some(entry);
        }
        if code.len() >= 2 {
            return self.fallback.get(&code[0..2]);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.ssic2015.len() + self.ssic2010.len() + self.fallback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING_CSV: &str = "\
sector,industry,subindustry,ssic2010,ssic2015
Manufacturing,Electronics,Semiconductors,26111,26112
Services,Food,Restaurants,,56111
Services,Food,Hawkers,56123,
Agriculture,Crops,Vegetables,,01131
";

    const FALLBACK_CSV: &str = "\
prefix,sector,industry,subindustry
26,Manufacturing,Electronics,General
56,Services,Food,General
";

    fn mapping() -> IndustryMapping {
        IndustryMapping::from_readers(MAPPING_CSV.as_bytes(), FALLBACK_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_lookup_prefers_2015_revision() {
        let m = mapping();
        let entry = m.lookup("26112").unwrap();
        assert_eq!(entry.subindustry, "Semiconductors");
    }

    #[test]
    fn test_lookup_falls_back_to_2010() {
        let m = mapping();
        let entry = m.lookup("56123").unwrap();
        assert_eq!(entry.subindustry, "Hawkers");
    }

    #[test]
    fn test_lookup_prefix_fallback() {
        let m = mapping();
        let entry = m.lookup("26999").unwrap();
        assert_eq!(entry.subindustry, "General");
        assert_eq!(entry.sector, "Manufacturing");
    }

    #[test]
    fn test_four_digit_codes_are_zero_padded() {
        let m = mapping();
        // "1131" pads to "01131" before lookup
        let entry = m.lookup("1131").unwrap();
        assert_eq!(entry.subindustry, "Vegetables");
    }

    #[test]
    fn test_unknown_code() {
        let m = mapping();
        assert!(m.lookup("99999").is_none());
        assert!(m.lookup("").is_none());
    }

    #[test]
    fn test_row_counts() {
        let m = mapping();
        assert_eq!(m.len(), 7);
        assert!(!m.is_empty());
    }
}
