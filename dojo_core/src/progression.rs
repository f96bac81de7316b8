//! Character progression: experience, skill points and skill levels

use crate::config::CharacterConstants;
use crate::types::SkillId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Experience needed for one skill point
pub const EXP_THRESHOLD: u32 = 300;

/// The protagonist's stats, shared by every screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub name: String,
    pub level: u32,
    /// Always below [`EXP_THRESHOLD`]
    pub experience: u32,
    pub skill_points: u32,
    pub health: u32,
    pub attack: u32,
    pub agility: u32,
    pub defense: u32,
    pub training_completed: u32,
    pub skills: BTreeMap<SkillId, u32>,
}

/// What a single experience grant did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceGain {
    pub gained: u32,
    pub skill_points: u32,
}

impl CharacterStats {
    pub fn new(base: &CharacterConstants) -> Self {
        CharacterStats {
            name: base.name.clone(),
            level: 1,
            experience: 0,
            skill_points: 0,
            health: base.health,
            attack: base.attack,
            agility: base.agility,
            defense: base.defense,
            training_completed: 0,
            skills: SkillId::STARTING
                .iter()
                .map(|id| (SkillId::from(*id), 0))
                .collect(),
        }
    }

    /// Add experience, turning every full threshold into a skill point.
    ///
    /// Level is derived from this grant's pre-reduction total, so callers pass
    /// only the increment since the last call. A zero grant changes nothing.
    pub fn apply_experience(&mut self, gained: u32) -> ExperienceGain {
        if gained == 0 {
            return ExperienceGain::default();
        }

        let total = self.experience as u64 + gained as u64;
        let gain = self.split_experience(total, gained);
        self.level = saturate(total / EXP_THRESHOLD as u64).saturating_add(1);
        gain
    }

    /// Add experience without touching level, as the warrior bonus does
    pub fn award_bonus(&mut self, gained: u32) -> ExperienceGain {
        if gained == 0 {
            return ExperienceGain::default();
        }

        let total = self.experience as u64 + gained as u64;
        self.split_experience(total, gained)
    }

    /// Record a finished training and grant its reward
    pub fn complete_training(&mut self, reward: u32) -> ExperienceGain {
        self.training_completed = self.training_completed.saturating_add(1);
        let gain = self.apply_experience(reward);
        tracing::info!(
            reward,
            skill_points = gain.skill_points,
            level = self.level,
            "training completed"
        );
        gain
    }

    fn split_experience(&mut self, total: u64, gained: u32) -> ExperienceGain {
        let threshold = EXP_THRESHOLD as u64;
        let new_points = saturate(total / threshold);
        self.experience = (total % threshold) as u32;
        self.skill_points = self.skill_points.saturating_add(new_points);
        ExperienceGain {
            gained,
            skill_points: new_points,
        }
    }

    /// Spend one skill point on a skill.
    ///
    /// Returns false, leaving everything untouched, when no points are left.
    /// Unknown ids are accepted and start from level 0.
    pub fn upgrade_skill(&mut self, skill: impl Into<SkillId>) -> bool {
        if self.skill_points == 0 {
            return false;
        }

        let skill = skill.into();
        self.skill_points -= 1;
        let level = self.skills.entry(skill.clone()).or_insert(0);
        *level += 1;
        tracing::info!(skill = %skill, level = *level, "skill upgraded");
        true
    }

    pub fn skill_level(&self, skill: &str) -> u32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Number of skills trained at least once
    pub fn skills_learned(&self) -> usize {
        self.skills.values().filter(|level| **level > 0).count()
    }

    /// Progress toward the next skill point, in [0, 1)
    pub fn experience_ratio(&self) -> f64 {
        self.experience as f64 / EXP_THRESHOLD as f64
    }
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self::new(&CharacterConstants::default())
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_character_defaults() {
        let stats = CharacterStats::default();
        assert_eq!(stats.name, "Po");
        assert_eq!(stats.level, 1);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.attack, 10);
        assert_eq!(stats.agility, 5);
        assert_eq!(stats.defense, 8);
        assert_eq!(stats.skills.len(), 5);
        assert_eq!(stats.skills_learned(), 0);
    }

    #[test]
    fn test_experience_splits_into_skill_points() {
        let mut stats = CharacterStats::default();
        stats.experience = 250;

        let gain = stats.apply_experience(400);

        // 650 = 2 * 300 + 50
        assert_eq!(gain.skill_points, 2);
        assert_eq!(stats.skill_points, 2);
        assert_eq!(stats.experience, 50);
        assert_eq!(stats.level, 3);
    }

    #[test]
    fn test_level_follows_latest_grant() {
        let mut stats = CharacterStats::default();
        stats.apply_experience(600);
        assert_eq!(stats.level, 3);

        // A small grant recomputes level from the small total
        stats.apply_experience(10);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.experience, 10);
        assert_eq!(stats.skill_points, 2);
    }

    #[test]
    fn test_bonus_keeps_level() {
        let mut stats = CharacterStats::default();
        stats.experience = 280;

        let gain = stats.award_bonus(50);

        assert_eq!(gain.skill_points, 1);
        assert_eq!(stats.experience, 30);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.training_completed, 0);
    }

    #[test]
    fn test_complete_training_counts() {
        let mut stats = CharacterStats::default();
        stats.complete_training(150);
        stats.complete_training(150);

        assert_eq!(stats.training_completed, 2);
        assert_eq!(stats.experience, 0);
        assert_eq!(stats.skill_points, 1);
        assert_eq!(stats.level, 2);
    }

    #[test]
    fn test_huge_grant_saturates() {
        let mut stats = CharacterStats::default();
        stats.experience = 299;
        stats.skill_points = u32::MAX - 1;

        stats.apply_experience(u32::MAX);

        assert_eq!(stats.skill_points, u32::MAX);
        assert!(stats.experience < EXP_THRESHOLD);
    }

    #[test]
    fn test_upgrade_without_points_is_noop() {
        let mut stats = CharacterStats::default();
        let before = stats.clone();

        assert!(!stats.upgrade_skill(SkillId::JUMP_HEIGHT));
        assert_eq!(stats, before);
    }

    #[test]
    fn test_upgrade_spends_one_point() {
        let mut stats = CharacterStats::default();
        stats.skill_points = 2;

        assert!(stats.upgrade_skill(SkillId::PUNCH_POWER));

        assert_eq!(stats.skill_points, 1);
        assert_eq!(stats.skill_level(SkillId::PUNCH_POWER), 1);
        assert_eq!(stats.skills_learned(), 1);
    }

    #[test]
    fn test_upgrade_accepts_unknown_skill() {
        let mut stats = CharacterStats::default();
        stats.skill_points = 1;

        assert!(stats.upgrade_skill("shellShock"));

        assert_eq!(stats.skill_level("shellShock"), 1);
        assert_eq!(stats.skills.len(), 6);
    }

    #[test]
    fn test_experience_ratio() {
        let mut stats = CharacterStats::default();
        stats.apply_experience(150);
        assert!((stats.experience_ratio() - 0.5).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn experience_stays_below_threshold(start in 0u32..EXP_THRESHOLD, gained in any::<u32>()) {
            let mut stats = CharacterStats::default();
            stats.experience = start;
            stats.apply_experience(gained);
            prop_assert!(stats.experience < EXP_THRESHOLD);
        }

        #[test]
        fn zero_grant_is_noop(start in 0u32..EXP_THRESHOLD, level in 1u32..50, points in 0u32..100) {
            let mut stats = CharacterStats::default();
            stats.experience = start;
            stats.level = level;
            stats.skill_points = points;
            let before = stats.clone();
            stats.apply_experience(0);
            prop_assert_eq!(stats, before);
        }

        #[test]
        fn skill_points_never_underflow(
            grants in prop::collection::vec(0u32..1000, 0..10),
            upgrades in prop::collection::vec(0usize..5, 0..40),
        ) {
            let mut stats = CharacterStats::default();
            for grant in grants {
                stats.apply_experience(grant);
            }
            let available = stats.skill_points;
            let mut spent = 0;
            for pick in upgrades {
                if stats.upgrade_skill(SkillId::STARTING[pick]) {
                    spent += 1;
                }
            }
            prop_assert!(spent <= available);
            prop_assert_eq!(stats.skill_points, available - spent);
            let levels: u32 = stats.skills.values().sum();
            prop_assert_eq!(levels, spent);
        }
    }
}
