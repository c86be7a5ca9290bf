use crate::map::{Marker, kind_icon};
use crate::types::{Workout, WorkoutDetails};
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = i16::from(verbose) - i16::from(quiet);
    let level = match net {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,trailmark={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

/// Minutes as `HH:MM:SS`. Callers pass validated durations (finite, positive).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_minutes(minutes: f64) -> String {
    let secs = (minutes * 60.0).round().abs() as u64;
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// One-line summary as shown in the workout list.
pub fn summary_line(w: &Workout) -> String {
    let base = format!(
        "{} {}\t{} km\t{} min",
        kind_icon(w.kind()),
        w.description(),
        w.distance(),
        w.duration()
    );
    match *w.details() {
        WorkoutDetails::Running { cadence, pace } => {
            format!("{base}\t{pace:.1} min/km\t{cadence} spm")
        }
        WorkoutDetails::Cycling {
            elevation_gain,
            speed,
        } => format!("{base}\t{speed:.1} km/h\t{elevation_gain} m"),
    }
}

/// Popup text with the options the map front end needs.
pub fn marker_line(m: &Marker) -> String {
    format!(
        "{}\t{}\t{}\t[{} {}-{}px]",
        m.workout_id, m.coords, m.content, m.popup.class_name, m.popup.min_width, m.popup.max_width
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NewWorkout;
    use crate::types::Coords;
    use chrono::{TimeZone, Utc};

    #[test]
    fn formats_minutes() {
        assert_eq!(format_minutes(24.0), "00:24:00");
        assert_eq!(format_minutes(95.5), "01:35:30");
    }

    #[test]
    fn summary_shows_kind_metric() {
        let date = Utc.with_ymd_and_hms(2024, 4, 14, 8, 0, 0).unwrap();
        let run = Workout::new(
            date,
            &NewWorkout::running(Coords::new(39.0, -12.0), 5.2, 24.0, 178.0),
        );
        assert_eq!(
            summary_line(&run),
            "🏃‍♂️ Running on April 14\t5.2 km\t24 min\t4.6 min/km\t178 spm"
        );

        let ride = Workout::new(
            date,
            &NewWorkout::cycling(Coords::new(39.0, -12.0), 27.0, 95.0, 523.0),
        );
        assert_eq!(
            summary_line(&ride),
            "🚴‍♀️ Cycling on April 14\t27 km\t95 min\t17.1 km/h\t523 m"
        );
    }
}
