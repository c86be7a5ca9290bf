//! Conversion between typed [`Workout`]s and the plain records stored in a
//! snapshot.
//!
//! The plain form carries an explicit `kind` tag so the right variant can be
//! rebuilt. Derived values (`pace`, `speed`, `description`) are written for
//! readers of the raw snapshot but never trusted on the way back in: they are
//! recomputed from the primary fields.

use crate::dlog;
use crate::error::DeserializationError;
use crate::input::NewWorkout;
use crate::types::{Coords, Workout, WorkoutDetails, WorkoutKind};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainRecord {
    pub id: String,
    /// RFC 3339, millisecond precision.
    pub date: String,
    /// `[lat, lng]`
    pub coords: [f64; 2],
    pub distance: f64,
    pub duration: f64,
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub click_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

pub fn serialize(w: &Workout) -> PlainRecord {
    let (cadence, elevation_gain, pace, speed) = match *w.details() {
        WorkoutDetails::Running { cadence, pace } => (Some(cadence), None, Some(pace), None),
        WorkoutDetails::Cycling {
            elevation_gain,
            speed,
        } => (None, Some(elevation_gain), None, Some(speed)),
    };

    PlainRecord {
        id: w.id().to_string(),
        date: w.date().to_rfc3339_opts(SecondsFormat::Millis, true),
        coords: w.coords().into(),
        distance: w.distance(),
        duration: w.duration(),
        kind: w.kind().as_str().to_string(),
        description: w.description().to_string(),
        click_count: w.click_count(),
        cadence,
        elevation_gain,
        pace,
        speed,
    }
}

pub fn deserialize(rec: PlainRecord) -> Result<Workout, DeserializationError> {
    let PlainRecord {
        id,
        date,
        coords,
        distance,
        duration,
        kind,
        click_count,
        cadence,
        elevation_gain,
        ..
    } = rec;

    let Ok(kind) = kind.parse::<WorkoutKind>() else {
        return Err(DeserializationError::UnknownKind { id, kind });
    };

    let Ok(parsed) = DateTime::parse_from_rfc3339(&date) else {
        return Err(DeserializationError::InvalidDate { id, date });
    };

    let coords = Coords::from(coords);
    let input = match kind {
        WorkoutKind::Running => {
            let Some(cadence) = cadence else {
                return Err(DeserializationError::MissingField {
                    id,
                    field: "cadence",
                });
            };
            NewWorkout::running(coords, distance, duration, cadence)
        }
        WorkoutKind::Cycling => {
            let Some(elevation_gain) = elevation_gain else {
                return Err(DeserializationError::MissingField {
                    id,
                    field: "elevationGain",
                });
            };
            NewWorkout::cycling(coords, distance, duration, elevation_gain)
        }
    };

    if let Err(e) = input.validate() {
        return Err(DeserializationError::InvalidValue {
            id,
            field: e.field(),
            reason: e.to_string(),
        });
    }

    Ok(Workout::from_parts(
        id,
        parsed.with_timezone(&Utc),
        &input,
        click_count,
    ))
}

pub fn serialize_all(workouts: &[Workout]) -> Vec<PlainRecord> {
    workouts.iter().map(serialize).collect()
}

pub fn deserialize_all(records: &[PlainRecord]) -> Result<Vec<Workout>, DeserializationError> {
    records.iter().cloned().map(deserialize).collect()
}

/// JSON array of plain records.
pub fn encode_snapshot(workouts: &[Workout]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serialize_all(workouts))
}

/// Decodes a snapshot written by [`encode_snapshot`].
///
/// A missing snapshot, blank text and JSON `null` all mean "no workouts".
/// A single bad record fails the whole snapshot.
pub fn decode_snapshot(text: Option<&str>) -> Result<Vec<Workout>, DeserializationError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(Vec::new());
    };

    let mut de = serde_json::Deserializer::from_str(text);
    let records: Option<Vec<PlainRecord>> =
        serde_path_to_error::deserialize(&mut de).map_err(|e| DeserializationError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })?;
    de.end().map_err(|source| DeserializationError::Json {
        path: ".".to_string(),
        source,
    })?;

    let records = records.unwrap_or_default();
    dlog!("decoding snapshot records={}", records.len());
    deserialize_all(&records)
}
