//! Boundary validation for workout form input.
//!
//! Records are built by a total constructor, so everything that could make a
//! derived metric undefined is rejected here first.

use crate::error::ValidationError;
use crate::types::{Coords, WorkoutKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindInput {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl KindInput {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Primary fields of a workout, as entered in the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// min
    pub duration: f64,
    pub extra: KindInput,
}

impl NewWorkout {
    pub const fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self {
            coords,
            distance,
            duration,
            extra: KindInput::Running { cadence },
        }
    }

    pub const fn cycling(
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self {
            coords,
            distance,
            duration,
            extra: KindInput::Cycling { elevation_gain },
        }
    }

    /// `extra` is the cadence for running and the elevation gain for cycling.
    pub const fn from_form(
        kind: WorkoutKind,
        coords: Coords,
        distance: f64,
        duration: f64,
        extra: f64,
    ) -> Self {
        match kind {
            WorkoutKind::Running => Self::running(coords, distance, duration, extra),
            WorkoutKind::Cycling => Self::cycling(coords, distance, duration, extra),
        }
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.extra.kind()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_coords(self.coords)?;
        positive("distance", self.distance)?;
        positive("duration", self.duration)?;
        match self.extra {
            KindInput::Running { cadence } => positive("cadence", cadence),
            KindInput::Cycling { elevation_gain } => finite("elevation gain", elevation_gain),
        }
    }
}

pub fn validate_coords(coords: Coords) -> Result<(), ValidationError> {
    in_range("latitude", coords.lat, -90, 90)?;
    in_range("longitude", coords.lng, -180, 180)
}

/// Parses a raw form value. Empty and non-numeric text are rejected.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            input: raw.to_string(),
        })?;
    finite(field, value)?;
    Ok(value)
}

fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive {
            field,
            value: value.to_string(),
        })
    }
}

fn in_range(field: &'static str, value: f64, min: i32, max: i32) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value < f64::from(min) || value > f64::from(max) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coords = Coords::new(0.0, 0.0);

    #[test]
    fn accepts_valid_running_and_cycling() {
        assert!(NewWorkout::running(Coords::new(39.0, -12.0), 5.2, 24.0, 178.0)
            .validate()
            .is_ok());
        assert!(NewWorkout::cycling(Coords::new(39.0, -12.0), 27.0, 95.0, 523.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_negative_distance() {
        let err = NewWorkout::from_form(WorkoutKind::Running, ORIGIN, -5.0, 20.0, 80.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "distance");
        assert!(matches!(err, ValidationError::NotPositive { .. }));
        assert_eq!(err.to_string(), "distance must be a positive number, got -5");
    }

    #[test]
    fn rejects_zero_duration_and_cadence() {
        let err = NewWorkout::running(ORIGIN, 5.0, 0.0, 80.0).validate().unwrap_err();
        assert_eq!(err.field(), "duration");

        let err = NewWorkout::running(ORIGIN, 5.0, 20.0, 0.0).validate().unwrap_err();
        assert_eq!(err.field(), "cadence");
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let err = NewWorkout::cycling(ORIGIN, f64::NAN, 20.0, 10.0)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::NonFinite { field: "distance" });

        let err = NewWorkout::cycling(ORIGIN, 5.0, 20.0, f64::INFINITY)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "elevation gain");
    }

    #[test]
    fn elevation_gain_may_be_negative_or_zero() {
        assert!(NewWorkout::cycling(ORIGIN, 12.0, 30.0, -150.0).validate().is_ok());
        assert!(NewWorkout::cycling(ORIGIN, 12.0, 30.0, 0.0).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_coords() {
        let err = NewWorkout::running(Coords::new(91.0, 0.0), 5.0, 20.0, 80.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "latitude");

        let err = NewWorkout::running(Coords::new(0.0, -180.5), 5.0, 20.0, 80.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "longitude");
    }

    #[test]
    fn parses_form_numbers() {
        assert_eq!(parse_number("distance", " 5.2 ").unwrap(), 5.2);
        assert!(matches!(
            parse_number("distance", ""),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_number("distance", "abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_number("distance", "inf"),
            Err(ValidationError::NonFinite { .. })
        ));
    }
}
