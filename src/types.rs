use crate::input::{KindInput, NewWorkout};
use chrono::{DateTime, SubsecRound, Utc};
use std::fmt;
use std::str::FromStr;

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            _ => Err(crate::error::ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// Kind-specific payload. The derived metric lives next to the input it
/// depends on so a record can never carry a pace without a cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    /// `cadence` in steps/min, `pace` in min/km.
    Running { cadence: f64, pace: f64 },
    /// `elevation_gain` in meters (negative on descent), `speed` in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

impl WorkoutDetails {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// min/km
pub fn calc_pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// km/h
pub fn calc_speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// `"<Kind> on <Month> <day-of-month>"`, e.g. `Running on April 14`.
pub fn build_description(kind: WorkoutKind, date: &DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), date.format("%B %-d"))
}

/// Last 10 digits of the creation time in epoch milliseconds.
pub fn workout_id_from_millis(millis: i64) -> String {
    let digits = millis.unsigned_abs().to_string();
    let start = digits.len().saturating_sub(10);
    digits[start..].to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    date: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    description: String,
    click_count: u32,
    details: WorkoutDetails,
}

impl Workout {
    /// Builds a record from already-validated input. The id is derived from
    /// `date`; the collection manager is responsible for keeping it unique.
    /// `date` is kept at millisecond precision, the precision of snapshots.
    pub fn new(date: DateTime<Utc>, input: &NewWorkout) -> Self {
        let date = date.trunc_subsecs(3);
        let id = workout_id_from_millis(date.timestamp_millis());
        Self::from_parts(id, date, input, 0)
    }

    /// Rebuilds a record from primary fields, recomputing everything derived.
    pub(crate) fn from_parts(
        id: String,
        date: DateTime<Utc>,
        input: &NewWorkout,
        click_count: u32,
    ) -> Self {
        let details = match input.extra {
            KindInput::Running { cadence } => WorkoutDetails::Running {
                cadence,
                pace: calc_pace(input.distance, input.duration),
            },
            KindInput::Cycling { elevation_gain } => WorkoutDetails::Cycling {
                elevation_gain,
                speed: calc_speed(input.distance, input.duration),
            },
        };

        Self {
            id,
            description: build_description(details.kind(), &date),
            date,
            coords: input.coords,
            distance: input.distance,
            duration: input.duration,
            click_count,
            details,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn click_count(&self) -> u32 {
        self.click_count
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub const fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub const fn cadence(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { cadence, .. } => Some(cadence),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub const fn elevation_gain(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub const fn pace(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Some(pace),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub const fn speed(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed, .. } => Some(speed),
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// The variant's derived metric with its unit.
    pub const fn metric(&self) -> (f64, &'static str) {
        match self.details {
            WorkoutDetails::Running { pace, .. } => (pace, "min/km"),
            WorkoutDetails::Cycling { speed, .. } => (speed, "km/h"),
        }
    }

    /// Rewrites the derived metric from distance and duration and returns it.
    pub fn recalculate(&mut self) -> f64 {
        match &mut self.details {
            WorkoutDetails::Running { pace, .. } => {
                *pace = calc_pace(self.distance, self.duration);
                *pace
            }
            WorkoutDetails::Cycling { speed, .. } => {
                *speed = calc_speed(self.distance, self.duration);
                *speed
            }
        }
    }

    pub(crate) const fn set_click_count(&mut self, count: u32) {
        self.click_count = count;
    }

    pub fn register_click(&mut self) -> u32 {
        self.click_count = self.click_count.saturating_add(1);
        self.click_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_derives_pace() {
        let input = NewWorkout::running(Coords::new(39.0, -12.0), 5.2, 24.0, 178.0);
        let w = Workout::new(at(2024, 4, 14), &input);

        assert_eq!(w.kind(), WorkoutKind::Running);
        assert!((w.pace().unwrap() - 24.0 / 5.2).abs() < 1e-12);
        assert_eq!(w.speed(), None);
        assert_eq!(w.cadence(), Some(178.0));
        assert_eq!(w.click_count(), 0);
    }

    #[test]
    fn cycling_derives_speed() {
        let input = NewWorkout::cycling(Coords::new(39.0, -12.0), 27.0, 95.0, 523.0);
        let w = Workout::new(at(2024, 4, 14), &input);

        let speed = w.speed().unwrap();
        assert!((speed - 27.0 / (95.0 / 60.0)).abs() < 1e-12);
        assert!((speed - 17.05).abs() < 0.01);
        assert_eq!(w.elevation_gain(), Some(523.0));
        assert_eq!(w.metric().1, "km/h");
    }

    #[test]
    fn recalculate_is_idempotent() {
        let input = NewWorkout::running(Coords::new(0.0, 0.0), 10.0, 55.0, 170.0);
        let mut w = Workout::new(at(2024, 1, 2), &input);
        let before = w.pace().unwrap();

        assert_eq!(w.recalculate(), before);
        assert_eq!(w.recalculate(), before);
        assert_eq!(w.pace(), Some(before));
    }

    #[test]
    fn description_uses_month_name_and_day_of_month() {
        let input = NewWorkout::cycling(Coords::new(0.0, 0.0), 1.0, 1.0, 0.0);
        let w = Workout::new(at(2023, 12, 3), &input);
        assert_eq!(w.description(), "Cycling on December 3");

        assert_eq!(
            build_description(WorkoutKind::Running, &at(2024, 4, 14)),
            "Running on April 14"
        );
    }

    #[test]
    fn id_is_last_ten_digits_of_millis() {
        assert_eq!(workout_id_from_millis(1_713_087_000_123), "3087000123");
        assert_eq!(workout_id_from_millis(42), "42");

        let date = Utc.timestamp_millis_opt(1_713_087_000_123).unwrap();
        let input = NewWorkout::running(Coords::new(0.0, 0.0), 1.0, 1.0, 1.0);
        assert_eq!(Workout::new(date, &input).id(), "3087000123");
    }

    #[test]
    fn register_click_counts_up() {
        let input = NewWorkout::running(Coords::new(0.0, 0.0), 1.0, 1.0, 1.0);
        let mut w = Workout::new(at(2024, 1, 1), &input);
        assert_eq!(w.register_click(), 1);
        assert_eq!(w.register_click(), 2);
        assert_eq!(w.click_count(), 2);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Running".parse::<WorkoutKind>().unwrap(), WorkoutKind::Running);
        assert_eq!(" cycling ".parse::<WorkoutKind>().unwrap(), WorkoutKind::Cycling);
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }
}
