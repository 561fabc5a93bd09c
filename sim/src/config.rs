//! Simulation tuning, loadable from RON.
//!
//! Every field defaults to the stock arena values, so a config file only has
//! to list what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::collision::CollisionTuning;
use crate::enemy::EnemyTuning;
use crate::player::PlayerTuning;
use crate::weapon::WeaponTuning;

/// Current config format version.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub version: u32,
    pub player: PlayerTuning,
    pub collision: CollisionTuning,
    pub enemy: EnemyTuning,
    pub weapon: WeaponTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            player: PlayerTuning::default(),
            collision: CollisionTuning::default(),
            enemy: EnemyTuning::default(),
            weapon: WeaponTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        let config: SimConfig =
            ron::from_str(text).map_err(|e| format!("failed to parse config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {path:?}: {e}"))?;
        Self::from_ron_str(&text).map_err(|e| format!("{path:?}: {e}"))
    }

    /// Pretty RON, handy for dumping the effective config.
    pub fn to_ron_string(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("failed to serialize config: {e}"))
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Every float must be finite. Comparisons are written so that NaN fails
    /// them too.
    pub fn validate(&self) -> Result<(), String> {
        if self.version != CONFIG_VERSION {
            return Err(format!(
                "unsupported config version {} (expected {})",
                self.version, CONFIG_VERSION
            ));
        }

        let p = &self.player;
        let c = &self.collision;
        let e = &self.enemy;
        let w = &self.weapon;

        let finite = [
            ("player.move_speed", p.move_speed),
            ("player.jump_force", p.jump_force),
            ("player.gravity", p.gravity),
            ("player.eye_height", p.eye_height),
            ("player.mouse_sensitivity", p.mouse_sensitivity),
            ("player.start_position.x", p.start_position[0]),
            ("player.start_position.y", p.start_position[1]),
            ("player.start_position.z", p.start_position[2]),
            ("collision.player_radius", c.player_radius),
            ("collision.player_height", c.player_height),
            ("collision.push_step", c.push_step),
            ("collision.map_half_size", c.map_half_size),
            ("enemy.speed", e.speed),
            ("enemy.spawn_half_extent", e.spawn_half_extent),
            ("enemy.spawn_height", e.spawn_height),
            ("enemy.size.x", e.size[0]),
            ("enemy.size.y", e.size[1]),
            ("enemy.size.z", e.size[2]),
            ("weapon.range", w.range),
            ("weapon.cooldown_secs", w.cooldown_secs),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number, got {value}"));
            }
        }

        let positive = [
            ("player.eye_height", p.eye_height),
            ("collision.map_half_size", c.map_half_size),
            ("weapon.range", w.range),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(format!("{name} must be positive"));
            }
        }

        let non_negative = [
            ("player.move_speed", p.move_speed),
            ("player.jump_force", p.jump_force),
            ("player.gravity", p.gravity),
            ("collision.player_radius", c.player_radius),
            ("collision.player_height", c.player_height),
            ("collision.push_step", c.push_step),
            ("enemy.speed", e.speed),
            ("enemy.spawn_half_extent", e.spawn_half_extent),
            ("weapon.cooldown_secs", w.cooldown_secs),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(format!("{name} must not be negative"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let config = SimConfig::from_ron_str(include_str!("../../assets/arena.ron")).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = SimConfig::from_ron_str(
            "(weapon: (cooldown_secs: 0.25), player: (normalize_diagonal: true))",
        )
        .unwrap();
        assert_eq!(config.weapon.cooldown_secs, 0.25);
        assert_eq!(config.weapon.damage, crate::weapon::WEAPON_DAMAGE);
        assert!(config.player.normalize_diagonal);
        assert_eq!(config.player.move_speed, crate::player::PLAYER_SPEED);
        assert_eq!(config.enemy, EnemyTuning::default());
    }

    #[test]
    fn wrong_version_is_rejected() {
        let err = SimConfig::from_ron_str("(version: 2)").unwrap_err();
        assert!(err.contains("version"));
    }

    #[test]
    fn nonsense_values_are_rejected() {
        assert!(SimConfig::from_ron_str("(weapon: (range: 0.0))").is_err());
        assert!(SimConfig::from_ron_str("(collision: (map_half_size: -1.0))").is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for doc in [
            "(collision: (map_half_size: NaN))",
            "(collision: (map_half_size: inf))",
            "(weapon: (cooldown_secs: NaN))",
            "(weapon: (range: inf))",
            "(player: (eye_height: NaN))",
            "(player: (gravity: inf))",
            "(player: (start_position: (0.0, NaN, 5.0)))",
            "(enemy: (speed: NaN))",
        ] {
            let err = SimConfig::from_ron_str(doc).unwrap_err();
            assert!(err.contains("finite"), "{doc}: {err}");
        }
    }

    #[test]
    fn negative_speeds_are_rejected() {
        assert!(SimConfig::from_ron_str("(player: (move_speed: -0.1))").is_err());
        assert!(SimConfig::from_ron_str("(enemy: (speed: -1.0))").is_err());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = SimConfig::from_ron_str("(weapon: ").unwrap_err();
        assert!(err.starts_with("failed to parse config"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SimConfig::load_from_file("does/not/exist.ron").unwrap_err();
        assert!(err.contains("exist.ron"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = SimConfig::default();
        config.enemy.count = 9;
        let text = config.to_ron_string().unwrap();
        assert_eq!(SimConfig::from_ron_str(&text).unwrap(), config);
    }
}
