// 📊 Skill Ranking
// Orders extracted skills by confidence, normalized by how often each
// skill shows up across the corpus so ubiquitous skills do not dominate

use serde::{Deserialize, Serialize};

/// One extracted skill with its raw confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Index into the corpus-wide skill vocabulary
    pub id: usize,
    pub name: String,
    pub confidence: f64,
}

/// Sort skills by confidence descending, after dividing each score by the
/// skill's occurrence count (+1 smoothing keeps zero counts from dividing
/// by zero). `counts` is indexed by skill id; ids past its end keep their
/// raw confidence.
pub fn rank_skills(skills: &[Skill], counts: &[u32]) -> Vec<Skill> {
    let mut ranked: Vec<Skill> = skills
        .iter()
        .map(|skill| {
            let count = counts.get(skill.id).copied().unwrap_or(0) + 1;
            Skill {
                id: skill.id,
                name: skill.name.clone(),
                confidence: skill.confidence / count as f64,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked
}

/// First `n` of an already-ranked list, clamped to its length
pub fn top_skills(skills: &[Skill], n: usize) -> &[Skill] {
    &skills[..n.min(skills.len())]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: usize, name: &str, confidence: f64) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_rank_normalizes_by_count() {
        let skills = vec![
            skill(0, "excel", 0.9),   // seen everywhere: count 8
            skill(1, "welding", 0.6), // rare: count 0
        ];
        let counts = vec![8, 0];

        let ranked = rank_skills(&skills, &counts);
        // 0.6 / 1 beats 0.9 / 9
        assert_eq!(ranked[0].name, "welding");
        assert_eq!(ranked[1].name, "excel");
        assert!((ranked[0].confidence - 0.6).abs() < 1e-9);
        assert!((ranked[1].confidence - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_rank_tolerates_short_counts() {
        let skills = vec![skill(5, "forklift", 0.4)];
        let ranked = rank_skills(&skills, &[]);
        assert!((ranked[0].confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_top_skills_clamps() {
        let skills = vec![skill(0, "a", 0.3), skill(1, "b", 0.2)];
        assert_eq!(top_skills(&skills, 1).len(), 1);
        assert_eq!(top_skills(&skills, 10).len(), 2);
        assert!(top_skills(&skills, 0).is_empty());
        assert_eq!(top_skills(&skills, 1)[0].name, "a");
    }
}
