//! Session state and core simulation types
//!
//! Everything one play-through mutates lives in [`Session`]. Components get
//! it by `&mut`; there is no ambient game state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{CatalogEntry, ObjectKind};
use super::spawner::{ObjectPool, Spawner};
use crate::identity::SessionIdentity;
use crate::settings::GameConfig;

/// Lifecycle phase. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no session in progress
    Idle,
    /// Identity form is open
    AwaitingIdentity,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Lives ran out; resets once the delay elapses
    GameOver { remaining_ticks: u32 },
}

impl GamePhase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }

    /// A session has started and not yet been reset
    pub fn in_session(&self) -> bool {
        matches!(
            self,
            GamePhase::Running | GamePhase::Paused | GamePhase::GameOver { .. }
        )
    }
}

/// Things that happened during a tick, for hosts to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Caught {
        id: u32,
        kind: ObjectKind,
        score_delta: i32,
    },
    Missed {
        id: u32,
        kind: ObjectKind,
        penalty: i32,
    },
    LifeLost {
        remaining: u32,
    },
    GameOver {
        score: i64,
    },
    /// The game over delay has elapsed. The host persists the score and
    /// resets the session.
    ResetDue,
}

/// The player's basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (pixels per frame)
    pub velocity: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
}

impl Actor {
    /// A stationary basket centered in the arena
    pub fn new(config: &GameConfig) -> Self {
        let a = &config.actor;
        Self {
            x: (config.arena.width - a.width) / 2.0,
            y: config.actor_y(),
            width: a.width,
            height: a.height,
            velocity: 0.0,
            max_speed: a.max_speed,
            acceleration: a.acceleration,
            friction: a.friction,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A falling reward or hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Top-left corner of the hit box; x never changes after spawn
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed (pixels per frame)
    pub speed: f32,
    pub score_delta: i32,
}

impl FallingObject {
    pub fn from_entry(id: u32, entry: &CatalogEntry, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind: entry.kind,
            pos,
            size: entry.size,
            speed,
            score_delta: entry.score_delta,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    pub fn is_hazard(&self) -> bool {
        self.score_delta < 0
    }

    pub fn is_reward(&self) -> bool {
        self.score_delta > 0
    }
}

/// Score and lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    /// Unbounded; goes negative when hazards are caught
    pub score: i64,
    pub lives: u32,
    pub max_lives: u32,
}

impl ScoreLedger {
    pub fn new(max_lives: u32) -> Self {
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
        }
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

/// Complete state of one play-through
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub actor: Actor,
    pub pool: ObjectPool,
    pub ledger: ScoreLedger,
    pub identity: Option<SessionIdentity>,
    /// Simulation tick counter (advances only while running)
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl Session {
    /// Create a session in the `Idle` phase with a full pool
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut session = Self {
            actor: Actor::new(&config),
            pool: ObjectPool::new(config.max_active),
            ledger: ScoreLedger::new(config.max_lives),
            config,
            phase: GamePhase::Idle,
            identity: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        session.replenish();
        session
    }

    /// Allocate a new entity ID. Wraps; IDs only need to be unique
    /// within one pool.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Top the pool back up to capacity
    pub fn replenish(&mut self) -> usize {
        let missing = self.pool.missing();
        for _ in 0..missing {
            let id = self.next_entity_id();
            let spawner = Spawner::new(&self.config);
            let object = spawner.spawn_one(&mut self.rng, id);
            self.pool.push(object);
        }
        missing
    }

    /// Back to a fresh session awaiting identity, whatever the current phase
    pub fn reset(&mut self) {
        self.actor = Actor::new(&self.config);
        self.ledger = ScoreLedger::new(self.config.max_lives);
        self.identity = None;
        self.time_ticks = 0;
        self.pool.clear();
        self.replenish();
        self.phase = GamePhase::AwaitingIdentity;
    }
}
