#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use trailmark::cli::{self, Cmd};
use trailmark::{LogError, SqliteStore, WorkoutLog, map, utils};

#[macro_use]
extern crate trailmark;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("opening workout store: {}", cli.db.display()))?;
    let mut log = WorkoutLog::open(store).context("restoring workouts")?;
    dlog!("db={} workouts={}", cli.db.display(), log.len());

    match cli.cmd {
        Cmd::Add { workout } => {
            let input = workout.to_input()?;
            let w = log.create_workout(&input).context("saving workout")?;
            println!("{}\t{}", w.id(), utils::summary_line(w));
        }
        Cmd::List { details } => {
            if log.is_empty() {
                tracing::info!("no workouts yet");
            }
            for (i, w) in log.list_workouts().enumerate() {
                if details {
                    let date = w.date().to_rfc3339();
                    println!(
                        "{}\t{}\t{date}\t{}\t{}\t{}",
                        i + 1,
                        w.id(),
                        w.coords(),
                        utils::summary_line(w),
                        utils::format_minutes(w.duration())
                    );
                } else {
                    println!("{}", utils::summary_line(w));
                }
            }
        }
        Cmd::Show { id } => match log.register_click(&id) {
            Ok(clicks) => {
                let w = log.find_by_id(&id)?;
                let marker = map::Marker::for_workout(w);
                println!("{}", utils::marker_line(&marker));
                dlog!("clicks id={id} count={clicks}");
            }
            Err(LogError::NotFound(e)) => {
                tracing::warn!(%e, "marker click ignored");
            }
            Err(e) => return Err(e).context("registering click"),
        },
        Cmd::Map { lat, lng } => {
            let position = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(cli::parse_coords(&lat, &lng)?),
                _ => None,
            };
            let Some(view) = map::locate(position) else {
                return Ok(());
            };
            println!(
                "view\t{}\tzoom={}\t{}\t{}",
                view.center,
                view.zoom,
                map::DEFAULT_TILE_URL,
                map::TILE_ATTRIBUTION
            );
            for marker in map::markers(log.workouts()) {
                println!("{}", utils::marker_line(&marker));
            }
        }
        Cmd::Reset => {
            log.reset_all().context("resetting workouts")?;
            println!("all workouts deleted");
        }
    }

    Ok(())
}
