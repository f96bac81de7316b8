//! Skill tree catalog loading

use super::ConfigError;
use crate::types::SkillId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display data for a skill on the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub benefit: String,
    pub drawback: String,
    #[serde(default)]
    pub description: String,
    /// Listed upgrade price in EXP; upgrades still spend one skill point
    #[serde(default)]
    pub cost: Option<u32>,
}

/// Container for skill definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SkillCatalog {
    skills: Vec<SkillDef>,
}

/// Load the skill catalog from a TOML file, keeping file order
pub fn load_skill_catalog(path: &Path) -> Result<Vec<SkillDef>, ConfigError> {
    let catalog: SkillCatalog = super::load_toml(path)?;
    Ok(catalog.skills)
}

/// Load the skill catalog from a TOML string, keeping file order
pub fn parse_skill_catalog(content: &str) -> Result<Vec<SkillDef>, ConfigError> {
    let catalog: SkillCatalog = super::parse_toml(content)?;
    Ok(catalog.skills)
}

/// Get the built-in skill tree
pub fn default_skills() -> Vec<SkillDef> {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_catalog(toml).unwrap_or_else(|e| {
        tracing::warn!("built-in skill catalog is invalid: {}", e);
        vec![SkillDef {
            id: SkillId::from("jumpHeight"),
            name: "Gorilla Tactics".to_string(),
            icon: String::new(),
            benefit: "+30% Jump Height".to_string(),
            drawback: "-50% Jump Cooldown Speed".to_string(),
            description: String::new(),
            cost: Some(100),
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let toml = r#"
[[skills]]
id = "ironShell"
name = "Iron Shell"
benefit = "+10% Defense"
drawback = "-10% Agility"
"#;

        let skills = parse_skill_catalog(toml).unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].id, SkillId::from("ironShell"));
        assert!(skills[0].icon.is_empty());
        assert_eq!(skills[0].cost, None);
    }

    #[test]
    fn test_default_skills_loads_all() {
        let skills = default_skills();

        // The tree shows four skills; focusedMind lives only on the character
        let ids: Vec<&str> = skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["jumpHeight", "punchPower", "dodgeChance", "innerPeace"]);
        assert_eq!(skills[1].name, "One Paw-nch Man");

        let costs: Vec<Option<u32>> = skills.iter().map(|s| s.cost).collect();
        assert_eq!(costs, [Some(100), Some(100), Some(100), Some(150)]);
    }
}
