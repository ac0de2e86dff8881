use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} has to be a positive number")]
    NotPositive(&'static str),
    #[error("{0} has to be a non-negative number")]
    Negative(&'static str),
}

/// Map pin, `[lat, lng]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Running,
    Cycling,
}

impl Kind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

/// Variant-specific fields, including the derived metric computed once at
/// construction time. The `kind` tag is the serialized discriminant; a
/// running record never carries a speed field and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Details {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

/// One recorded activity session.
///
/// Only the `Workout::running` / `Workout::cycling` factories build new
/// values; they validate inputs and fill in every derived field, so a
/// `Workout` is never observable half-constructed. Values coming back from
/// the store are deserialized wholesale instead, keeping whatever was
/// persisted (see `store`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub details: Details,
}

impl Workout {
    pub fn running(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<Self, InputError> {
        require_positive("distance", distance_km)?;
        require_positive("duration", duration_min)?;
        require_positive("cadence", cadence_spm)?;

        let details = Details::Running {
            cadence_spm,
            pace_min_per_km: duration_min / distance_km,
        };
        Ok(Self::assemble(coords, distance_km, duration_min, details))
    }

    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self, InputError> {
        require_positive("distance", distance_km)?;
        require_positive("duration", duration_min)?;
        require_non_negative("elevation gain", elevation_gain_m)?;

        let details = Details::Cycling {
            elevation_gain_m,
            speed_km_per_h: distance_km / (duration_min / 60.0),
        };
        Ok(Self::assemble(coords, distance_km, duration_min, details))
    }

    // The description needs the discriminant, so it is filled in here, after
    // the variant details exist, never inside a half-built base record.
    fn assemble(coords: Coords, distance_km: f64, duration_min: f64, details: Details) -> Self {
        let created_at = Utc::now();
        let mut w = Self {
            id: id_from_timestamp(created_at),
            created_at,
            coords,
            distance_km,
            duration_min,
            description: String::new(),
            clicks: 0,
            details,
        };
        w.description = describe(w.kind(), w.created_at);
        w
    }

    pub const fn kind(&self) -> Kind {
        match self.details {
            Details::Running { .. } => Kind::Running,
            Details::Cycling { .. } => Kind::Cycling,
        }
    }

    /// The user tapped this workout in the list or on the map. Only the
    /// counter moves.
    pub const fn record_interaction(&mut self) {
        self.clicks += 1;
    }
}

/// `"{Kind} on {Month} {Day}"`, e.g. `"Running on August 23"`.
pub fn describe(kind: Kind, at: DateTime<Utc>) -> String {
    let month = MONTHS[at.month0() as usize];
    format!("{} on {} {}", kind.label(), month, at.day())
}

/// Trailing ten digits of the creation timestamp in milliseconds.
///
/// Unique enough to correlate list rows with map markers within one run;
/// two workouts created in the same millisecond would collide.
fn id_from_timestamp(at: DateTime<Utc>) -> String {
    let ms = at.timestamp_millis().unsigned_abs().to_string();
    let cut = ms.len().saturating_sub(10);
    ms[cut..].to_string()
}

fn require_positive(field: &'static str, v: f64) -> Result<(), InputError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(InputError::NotPositive(field))
    }
}

fn require_non_negative(field: &'static str, v: f64) -> Result<(), InputError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative(field))
    }
}
