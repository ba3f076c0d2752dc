//! Player identity
//!
//! The identity form collects a player ID and display name before a
//! session starts. Typing a known ID fills in the stored name.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::leaderboard::PlayerStore;

/// Who is playing the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: String,
    pub name: String,
}

impl SessionIdentity {
    /// Trim both fields and reject empty ones
    pub fn new(id: &str, name: &str) -> Result<Self, ValidationError> {
        let id = id.trim();
        let name = name.trim();
        match (id.is_empty(), name.is_empty()) {
            (true, true) => Err(ValidationError::MissingBoth),
            (true, false) => Err(ValidationError::MissingId),
            (false, true) => Err(ValidationError::MissingName),
            (false, false) => Ok(Self {
                id: id.to_string(),
                name: name.to_string(),
            }),
        }
    }
}

/// State of the identity form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityForm {
    pub id: String,
    pub name: String,
    /// Message from the last rejected submit
    pub error: Option<ValidationError>,
}

impl IdentityForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the ID field and auto-fill the name from the store.
    ///
    /// An unknown or empty ID clears the name field. Returns the name that
    /// was filled in, if any.
    pub fn set_id<S: PlayerStore + ?Sized>(&mut self, id: &str, store: &S) -> Option<&str> {
        self.id = id.to_string();
        let trimmed = id.trim();
        let found = if trimmed.is_empty() {
            None
        } else {
            store.find(trimmed)
        };
        match found {
            Some(record) => {
                self.name = record.name;
                Some(self.name.as_str())
            }
            None => {
                self.name.clear();
                None
            }
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Validate the fields. On success the error is cleared and, for a
    /// returning player, the name field shows the stored name.
    pub fn submit<S: PlayerStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<SessionIdentity, ValidationError> {
        let identity = match SessionIdentity::new(&self.id, &self.name) {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("Identity rejected: {}", e);
                self.error = Some(e);
                return Err(e);
            }
        };
        self.error = None;
        if let Some(record) = store.find(&identity.id) {
            log::info!(
                "Returning player {} (best score {})",
                identity.id,
                record.best_score
            );
            self.name = record.name;
        }
        Ok(identity)
    }

    /// Empty every field (after a session ends)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
