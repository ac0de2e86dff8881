use crate::dlog;
use crate::types::Workout;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Fixed key the whole collection lives under in the medium.
pub const STORAGE_KEY: &str = "workouts";

/// The flat string-keyed persistence medium, consumed as an opaque
/// get/set/remove surface. Medium failures bubble up as errors instead of
/// being swallowed; losing a save silently is worse than reporting it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Volatile medium. Nothing survives the process; handy for tests and dry
/// runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Serializes the ordered workout collection into the medium and
/// reconstitutes it on load.
///
/// The serialized form is one JSON array under [`STORAGE_KEY`]; each record
/// carries a first-class `kind` discriminant plus every base and variant
/// field, including the derived metric and description computed at creation
/// time. Loading dispatches on the discriminant and restores those fields
/// verbatim. It never recomputes them, so a reload returns values
/// indistinguishable from the ones that were saved even if the derivation
/// formulas change between releases.
pub struct WorkoutStore<S> {
    medium: S,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub const fn new(medium: S) -> Self {
        Self { medium }
    }

    /// Overwrites whatever was stored before with the full collection.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let blob = serde_json::to_string(workouts).context("serializing workouts")?;
        self.medium.set(STORAGE_KEY, &blob)
    }

    /// An absent record is a normal first run and yields an empty
    /// collection. A present but corrupt record (unparseable JSON, missing
    /// or unknown discriminant, missing/non-numeric fields, non-positive
    /// distance or duration) discards the whole collection with a warning
    /// and also yields empty; there is no partial recovery.
    pub fn load(&self) -> Result<Vec<Workout>> {
        let Some(blob) = self.medium.get(STORAGE_KEY)? else {
            dlog!("no stored workouts, starting empty");
            return Ok(Vec::new());
        };

        let workouts: Vec<Workout> = match serde_json::from_str(&blob) {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(err = %e, "stored workouts are unreadable, starting empty");
                return Ok(Vec::new());
            }
        };

        if let Some(bad) = workouts.iter().find(|w| !Self::is_sound(w)) {
            tracing::warn!(id = %bad.id, "stored workout breaks invariants, starting empty");
            return Ok(Vec::new());
        }

        dlog!("loaded {} stored workouts", workouts.len());
        Ok(workouts)
    }

    /// Removes the record; loads come back empty until the next save.
    pub fn clear(&mut self) -> Result<()> {
        self.medium.remove(STORAGE_KEY)
    }

    pub const fn medium(&self) -> &S {
        &self.medium
    }

    fn is_sound(w: &Workout) -> bool {
        w.distance_km.is_finite()
            && w.distance_km > 0.0
            && w.duration_min.is_finite()
            && w.duration_min > 0.0
    }
}
