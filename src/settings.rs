//! Game configuration
//!
//! Arena geometry, basket tuning, pool size and the object catalog.
//! Persisted separately from player records in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{CatalogEntry, DEFAULT_CATALOG};

/// Play area size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Basket geometry and handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the arena floor to the basket's top edge
    pub floor_offset: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    /// Velocity multiplier per frame with no input held
    pub friction: f32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
            floor_offset: BASKET_FLOOR_OFFSET,
            max_speed: BASKET_MAX_SPEED,
            acceleration: BASKET_ACCELERATION,
            friction: BASKET_FRICTION,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub actor: ActorConfig,
    /// Objects falling at once
    pub max_active: usize,
    pub max_lives: u32,
    /// Upper bound of the random speed added to each spawn's base speed
    pub speed_jitter: f32,
    /// Ticks between game over and the automatic reset
    pub game_over_delay_ticks: u32,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            actor: ActorConfig::default(),
            max_active: MAX_ACTIVE_OBJECTS,
            max_lives: MAX_LIVES,
            speed_jitter: SPEED_JITTER,
            game_over_delay_ticks: GAME_OVER_DELAY_TICKS,
            catalog: DEFAULT_CATALOG.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena.width", self.arena.width),
            ("arena.height", self.arena.height),
            ("actor.width", self.actor.width),
            ("actor.height", self.actor.height),
            ("actor.max_speed", self.actor.max_speed),
            ("actor.acceleration", self.actor.acceleration),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.actor.friction > 0.0 && self.actor.friction <= 1.0) {
            return Err(ConfigError::Friction(self.actor.friction));
        }
        if !(self.speed_jitter >= 0.0 && self.speed_jitter.is_finite()) {
            return Err(ConfigError::NotPositive {
                field: "speed_jitter",
                value: self.speed_jitter,
            });
        }
        let actor_y = self.actor_y();
        if !(actor_y >= 0.0 && actor_y <= self.arena.height - self.actor.height) {
            return Err(ConfigError::FloorOffset {
                offset: self.actor.floor_offset,
            });
        }
        if self.actor.width > self.arena.width {
            return Err(ConfigError::ActorTooWide {
                actor: self.actor.width,
                arena: self.arena.width,
            });
        }
        if self.max_active == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.max_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for entry in &self.catalog {
            if !(entry.size > 0.0 && entry.size.is_finite()) {
                return Err(ConfigError::NotPositive {
                    field: "catalog.size",
                    value: entry.size,
                });
            }
            if !(entry.base_speed > 0.0 && entry.base_speed.is_finite()) {
                return Err(ConfigError::NotPositive {
                    field: "catalog.base_speed",
                    value: entry.base_speed,
                });
            }
            if entry.size > self.arena.width {
                return Err(ConfigError::ObjectTooWide {
                    kind: entry.kind,
                    size: entry.size,
                    arena: self.arena.width,
                });
            }
        }
        Ok(())
    }

    /// Top edge of the basket
    pub fn actor_y(&self) -> f32 {
        self.arena.height - self.actor.floor_offset
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "fruit_catcher_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native builds have nowhere to keep a config, so they play the
    /// defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.actor_y(), 550.0);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = GameConfig::from_json(r#"{ "max_lives": 3, "max_active": 1 }"#).unwrap();
        assert_eq!(config.max_lives, 3);
        assert_eq!(config.max_active, 1);
        assert_eq!(config.arena, ArenaConfig::default());
        assert_eq!(config.catalog.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_non_finite_jitter() {
        for jitter in [f32::NAN, f32::INFINITY, -1.0] {
            let config = GameConfig {
                speed_jitter: jitter,
                ..GameConfig::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::NotPositive {
                        field: "speed_jitter",
                        ..
                    })
                ),
                "{jitter}"
            );
        }

        let mut config = GameConfig::default();
        config.arena.width = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.actor.friction = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Friction(_))));

        let mut config = GameConfig::default();
        config.max_active = 0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool)));

        let mut config = GameConfig::default();
        config.catalog.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCatalog)));

        let mut config = GameConfig::default();
        config.actor.width = 900.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ActorTooWide { .. })
        ));

        let mut config = GameConfig::default();
        config.actor.floor_offset = 5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FloorOffset { .. })
        ));

        let mut config = GameConfig::default();
        config.actor.floor_offset = 700.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FloorOffset { .. })
        ));

        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
