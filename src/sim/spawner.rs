//! Object spawning and the active object pool

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use super::state::FallingObject;
use crate::settings::GameConfig;

/// Hazards fall this many times faster than their catalog speed
pub const HAZARD_SPEED_MULTIPLIER: f32 = 2.0;

/// Creates falling objects from the catalog
#[derive(Debug, Clone, Copy)]
pub struct Spawner<'a> {
    catalog: &'a [CatalogEntry],
    arena_width: f32,
    speed_jitter: f32,
}

impl<'a> Spawner<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            catalog: &config.catalog,
            arena_width: config.arena.width,
            speed_jitter: config.speed_jitter,
        }
    }

    /// Spawn one object at the top of the arena.
    ///
    /// The catalog entry and horizontal position are uniform; speed is the
    /// entry's base speed plus up to `speed_jitter`, doubled for hazards.
    pub fn spawn_one<R: Rng>(&self, rng: &mut R, id: u32) -> FallingObject {
        let entry = &self.catalog[rng.random_range(0..self.catalog.len())];
        let max_x = (self.arena_width - entry.size).max(0.0);
        let x = rng.random_range(0.0..=max_x);
        let mut speed = entry.base_speed + rng.random_range(0.0..=self.speed_jitter);
        if entry.is_hazard() {
            speed *= HAZARD_SPEED_MULTIPLIER;
        }
        FallingObject::from_entry(id, entry, Vec2::new(x, 0.0), speed)
    }
}

/// Objects currently falling, in spawn order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPool {
    objects: Vec<FallingObject>,
    capacity: usize,
}

impl ObjectPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.objects.len() >= self.capacity
    }

    /// Slots left to fill
    pub fn missing(&self) -> usize {
        self.capacity.saturating_sub(self.objects.len())
    }

    /// Add an object; ignored when the pool is already full
    pub fn push(&mut self, object: FallingObject) -> bool {
        if self.is_full() {
            log::warn!("Object pool full, dropping object {}", object.id);
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FallingObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn get(&self, id: u32) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Move every object out, leaving the pool empty
    pub fn take(&mut self) -> Vec<FallingObject> {
        std::mem::take(&mut self.objects)
    }

    /// Replace the contents with the given objects (truncated to capacity)
    pub fn restore(&mut self, mut objects: Vec<FallingObject>) {
        objects.truncate(self.capacity);
        self.objects = objects;
    }
}

impl<'a> IntoIterator for &'a ObjectPool {
    type Item = &'a FallingObject;
    type IntoIter = std::slice::Iter<'a, FallingObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
