use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub const MAX_MAGNIFICATION: u32 = 20;
pub const MAX_ANIMATION_FRAMES: usize = 100;
/// GIF frame delays are stored as u16 centiseconds
pub const MAX_DELAY_10MS: u32 = u16::MAX as u32;

/// Tunables for a game: how runs are computed and how they are rendered.
/// Any field missing from a YAML file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pixels per cell edge in rendered images
    pub magnification: u32,
    /// How long each animation frame is shown, in 10ms units
    pub delay_10ms: u32,
    /// Worker threads per generation (<= 0 means 1)
    pub worker_count: i32,
    /// Generations computed per run
    pub max_cycles: usize,
    /// How many times an animation repeats
    pub loop_count: u16,
    /// Default cap on animation frames
    pub max_frames: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            magnification: 1,
            delay_10ms: 5 * 100,
            worker_count: 1,
            max_cycles: 10,
            loop_count: 5,
            max_frames: 20,
        }
    }
}

impl GameConfig {
    /// Load config from a YAML file
    pub fn from_yaml(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("cannot read {path}: {e}")))?;
        let config: GameConfig = serde_yaml::from_str(&contents)
            .map_err(|e| GameError::Config(format!("cannot parse {path}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a YAML file
    pub fn to_yaml(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| GameError::Config(e.to_string()))?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_magnification(self.magnification)?;
        validate_max_frames(self.max_frames)?;
        if self.delay_10ms > MAX_DELAY_10MS {
            return Err(GameError::Config(format!(
                "delay must be at most {MAX_DELAY_10MS} (10ms units), got {}",
                self.delay_10ms
            )));
        }
        Ok(())
    }
}

pub fn validate_magnification(magnification: u32) -> Result<()> {
    if !(1..=MAX_MAGNIFICATION).contains(&magnification) {
        return Err(GameError::Config(format!(
            "magnification must be in 1..={MAX_MAGNIFICATION}, got {magnification}"
        )));
    }
    Ok(())
}

pub fn validate_max_frames(max_frames: usize) -> Result<()> {
    if !(1..=MAX_ANIMATION_FRAMES).contains(&max_frames) {
        return Err(GameError::Config(format!(
            "max frames must be in 1..={MAX_ANIMATION_FRAMES}, got {max_frames}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delay_10ms, 500);
        assert_eq!(config.max_cycles, 10);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: GameConfig = serde_yaml::from_str("worker_count: 4\nmagnification: 3\n").unwrap();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.magnification, 3);
        assert_eq!(config.max_cycles, GameConfig::default().max_cycles);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = GameConfig { magnification: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::Config(_))));

        let config = GameConfig { max_frames: 101, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_delay_is_capped_at_gif_range() {
        let config = GameConfig { delay_10ms: MAX_DELAY_10MS, ..GameConfig::default() };
        assert!(config.validate().is_ok());

        let config = GameConfig { delay_10ms: 500_000_000, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn test_non_positive_workers_pass_validation() {
        let config = GameConfig { worker_count: -3, ..GameConfig::default() };
        assert!(config.validate().is_ok());
    }
}
