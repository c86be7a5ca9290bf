pub mod cli;
pub mod codec;
pub mod collection;
pub mod database;
pub mod error;
pub mod input;
pub mod map;
pub mod types;
pub mod utils;

pub use collection::{LogState, WorkoutLog};
pub use database::{KeyValueStore, MemoryStore, SNAPSHOT_KEY, SqliteStore};
pub use error::{DeserializationError, LogError, NotFound, StoreError, ValidationError};
pub use input::NewWorkout;
pub use types::{Coords, Workout, WorkoutDetails, WorkoutKind};
