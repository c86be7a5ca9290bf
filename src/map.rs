//! What the map front end needs to draw workouts: the initial view, one
//! marker per workout with its popup, and the form's kind-dependent field.

use crate::types::{Coords, Workout, WorkoutKind};

pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coords,
    pub zoom: u8,
}

impl MapView {
    pub const fn centered_on(center: Coords) -> Self {
        Self {
            center,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Initial view from the user's position, if one could be obtained.
pub fn locate(position: Option<Coords>) -> Option<MapView> {
    let Some(center) = position else {
        tracing::warn!("could not get your location");
        return None;
    };
    Some(MapView::centered_on(center))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    pub fn for_kind(kind: WorkoutKind) -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{kind}-popup"),
        }
    }
}

pub const fn kind_icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Resolves a marker click back to its workout.
    pub workout_id: String,
    pub coords: Coords,
    pub popup: PopupOptions,
    pub content: String,
}

impl Marker {
    pub fn for_workout(w: &Workout) -> Self {
        Self {
            workout_id: w.id().to_string(),
            coords: w.coords(),
            popup: PopupOptions::for_kind(w.kind()),
            content: format!("{} {}", kind_icon(w.kind()), w.description()),
        }
    }
}

pub fn markers(workouts: &[Workout]) -> Vec<Marker> {
    workouts.iter().map(Marker::for_workout).collect()
}

/// Which kind-specific input the workout form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFields {
    pub cadence_visible: bool,
    pub elevation_visible: bool,
}

impl FormFields {
    pub const fn for_kind(kind: WorkoutKind) -> Self {
        let running = matches!(kind, WorkoutKind::Running);
        Self {
            cadence_visible: running,
            elevation_visible: !running,
        }
    }

    /// Swaps the visible field, as when the workout type changes.
    pub const fn toggle(self) -> Self {
        Self {
            cadence_visible: !self.cadence_visible,
            elevation_visible: !self.elevation_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NewWorkout;
    use chrono::{TimeZone, Utc};

    #[test]
    fn locate_centers_at_default_zoom() {
        let view = locate(Some(Coords::new(38.7, -9.1))).unwrap();
        assert_eq!(view.zoom, 13);
        assert_eq!(view.center, Coords::new(38.7, -9.1));
        assert_eq!(locate(None), None);
    }

    #[test]
    fn marker_carries_id_and_popup() {
        let date = Utc.with_ymd_and_hms(2024, 4, 14, 8, 0, 0).unwrap();
        let w = Workout::new(
            date,
            &NewWorkout::cycling(Coords::new(39.0, -12.0), 27.0, 95.0, 523.0),
        );
        let m = Marker::for_workout(&w);

        assert_eq!(m.workout_id, w.id());
        assert_eq!(m.coords, w.coords());
        assert_eq!(m.popup.class_name, "cycling-popup");
        assert_eq!(m.popup.max_width, 250);
        assert!(!m.popup.auto_close);
        assert_eq!(m.content, "🚴‍♀️ Cycling on April 14");
    }

    #[test]
    fn tile_layer_is_openstreetmap() {
        assert!(DEFAULT_TILE_URL.contains("{z}/{x}/{y}"));
        assert!(TILE_ATTRIBUTION.contains("OpenStreetMap"));
    }

    #[test]
    fn form_fields_toggle() {
        let f = FormFields::for_kind(WorkoutKind::Running);
        assert!(f.cadence_visible && !f.elevation_visible);
        assert_eq!(f.toggle(), FormFields::for_kind(WorkoutKind::Cycling));
        assert_eq!(f.toggle().toggle(), f);
    }
}
