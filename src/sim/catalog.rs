//! Falling object type catalog
//!
//! Static configuration: which kinds of object can fall, how big they are,
//! how fast they fall and what they are worth. Never mutated at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Falling object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Apple,
    Orange,
    Cherry,
    Watermelon,
    RottenApple,
    Bomb,
}

impl ObjectKind {
    /// Stable name used for asset lookup and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Apple => "apple",
            ObjectKind::Orange => "orange",
            ObjectKind::Cherry => "cherry",
            ObjectKind::Watermelon => "watermelon",
            ObjectKind::RottenApple => "rotten_apple",
            ObjectKind::Bomb => "bomb",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "apple" => Some(ObjectKind::Apple),
            "orange" => Some(ObjectKind::Orange),
            "cherry" => Some(ObjectKind::Cherry),
            "watermelon" => Some(ObjectKind::Watermelon),
            "rotten_apple" | "rotten" => Some(ObjectKind::RottenApple),
            "bomb" => Some(ObjectKind::Bomb),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: ObjectKind,
    /// Edge length of the object's square hit box (pixels)
    pub size: f32,
    /// Fall speed before jitter (pixels per frame)
    pub base_speed: f32,
    /// Applied to the score on catch. Negative marks a hazard.
    pub score_delta: i32,
}

impl CatalogEntry {
    pub const fn new(kind: ObjectKind, size: f32, base_speed: f32, score_delta: i32) -> Self {
        Self {
            kind,
            size,
            base_speed,
            score_delta,
        }
    }

    pub fn is_hazard(&self) -> bool {
        self.score_delta < 0
    }

    pub fn is_reward(&self) -> bool {
        self.score_delta > 0
    }
}

/// The classic catalog: four fruits, two hazards
pub const DEFAULT_CATALOG: [CatalogEntry; 6] = [
    CatalogEntry::new(ObjectKind::Apple, 30.0, 3.0, 1),
    CatalogEntry::new(ObjectKind::Orange, 32.0, 2.5, 2),
    CatalogEntry::new(ObjectKind::Cherry, 20.0, 4.0, 3),
    CatalogEntry::new(ObjectKind::Watermelon, 44.0, 2.0, 5),
    CatalogEntry::new(ObjectKind::RottenApple, 30.0, 2.5, -2),
    CatalogEntry::new(ObjectKind::Bomb, 30.0, 3.0, -5),
];
