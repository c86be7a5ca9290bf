use crate::error::ValidationError;
use crate::input::{NewWorkout, parse_number};
use crate::types::Coords;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB: &str = "trailmark.sqlite3";

#[derive(Parser, Debug)]
#[command(
    name = "trailmark",
    about = "Log running and cycling workouts pinned to map coordinates"
)]
pub struct Cli {
    /// SQLite file holding the workout snapshot.
    #[arg(long, env = "TRAILMARK_DB", default_value = DEFAULT_DB, global = true)]
    pub db: PathBuf,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a map position.
    Add {
        #[command(subcommand)]
        workout: AddCmd,
    },

    /// List workouts, oldest first.
    List {
        /// Print id, date and coordinates too.
        #[arg(long)]
        details: bool,
    },

    /// Open the popup of a workout's marker (counts as a click).
    Show { id: String },

    /// Print the map view around a position and every workout marker.
    Map {
        /// Current latitude. Without a position the map is not shown.
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<String>,

        /// Current longitude.
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<String>,
    },

    /// Delete every workout.
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum AddCmd {
    Running {
        #[command(flatten)]
        form: FormArgs,

        /// steps/min
        #[arg(long, allow_hyphen_values = true)]
        cadence: String,
    },
    Cycling {
        #[command(flatten)]
        form: FormArgs,

        /// meters, negative for a net descent
        #[arg(long, allow_hyphen_values = true)]
        elevation: String,
    },
}

/// Form values shared by every workout type. Kept as text so bad input
/// is reported by the same validation as any other front end.
#[derive(Args, Debug)]
pub struct FormArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: String,

    /// km
    #[arg(long, allow_hyphen_values = true)]
    pub distance: String,

    /// minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: String,
}

impl FormArgs {
    fn coords(&self) -> Result<Coords, ValidationError> {
        parse_coords(&self.lat, &self.lng)
    }
}

impl AddCmd {
    pub fn to_input(&self) -> Result<NewWorkout, ValidationError> {
        match self {
            Self::Running { form, cadence } => Ok(NewWorkout::running(
                form.coords()?,
                parse_number("distance", &form.distance)?,
                parse_number("duration", &form.duration)?,
                parse_number("cadence", cadence)?,
            )),
            Self::Cycling { form, elevation } => Ok(NewWorkout::cycling(
                form.coords()?,
                parse_number("distance", &form.distance)?,
                parse_number("duration", &form.duration)?,
                parse_number("elevation gain", elevation)?,
            )),
        }
    }
}

pub fn parse_coords(lat: &str, lng: &str) -> Result<Coords, ValidationError> {
    Ok(Coords::new(
        parse_number("latitude", lat)?,
        parse_number("longitude", lng)?,
    ))
}
