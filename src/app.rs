use crate::dlog;
use crate::store::{KeyValueStore, WorkoutStore};
use crate::types::{Coords, Kind, Workout};
use anyhow::Result;

pub const DEFAULT_ZOOM: u8 = 13;

/// Outbound calls to whatever renders the map. Pin clicks travel the other
/// way, as `FormSubmission::click_coords`, so they are not part of this
/// surface.
pub trait MapView {
    fn set_view(&mut self, coords: Coords, zoom: u8);
    fn add_marker(&mut self, coords: Coords, popup: &str);
}

/// Map stand-in that reports markers and view changes through tracing.
#[derive(Debug, Default)]
pub struct LogMap;

impl MapView for LogMap {
    fn set_view(&mut self, coords: Coords, zoom: u8) {
        tracing::info!(lat = coords.lat, lng = coords.lng, zoom, "map view");
    }

    fn add_marker(&mut self, coords: Coords, popup: &str) {
        tracing::info!(lat = coords.lat, lng = coords.lng, popup, "map marker");
    }
}

/// What the form collaborator yields on submission. Raw user input; nothing
/// here has been validated yet.
#[derive(Debug, Clone, Copy)]
pub struct FormSubmission {
    pub kind: Kind,
    pub distance: f64,
    pub duration: f64,
    /// Cadence for running, elevation gain for cycling.
    pub cadence_or_elevation: f64,
    pub click_coords: Coords,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded { id: String },
    /// Validation failed; `message` goes to the user, nothing was created
    /// or persisted.
    Rejected { message: String },
}

/// Owns the ordered workout collection, the store, and the map handle.
/// Insertion order is display order is marker order.
pub struct App<S, M> {
    store: WorkoutStore<S>,
    map: M,
    workouts: Vec<Workout>,
}

impl<S: KeyValueStore, M: MapView> App<S, M> {
    /// Loads the persisted collection and renders a marker per workout.
    pub fn start(medium: S, mut map: M) -> Result<Self> {
        let store = WorkoutStore::new(medium);
        let workouts = store.load()?;
        for w in &workouts {
            map.add_marker(w.coords, &w.description);
        }
        dlog!("app started with {} workouts", workouts.len());
        Ok(Self {
            store,
            map,
            workouts,
        })
    }

    /// Validates the submission, appends the workout, places its marker,
    /// and persists the whole collection. Invalid input comes back as
    /// `Rejected`, a report for the user; only the persistence medium can
    /// make this an `Err`.
    pub fn submit(&mut self, form: FormSubmission) -> Result<SubmitOutcome> {
        let built = match form.kind {
            Kind::Running => Workout::running(
                form.click_coords,
                form.distance,
                form.duration,
                form.cadence_or_elevation,
            ),
            Kind::Cycling => Workout::cycling(
                form.click_coords,
                form.distance,
                form.duration,
                form.cadence_or_elevation,
            ),
        };

        let workout = match built {
            Ok(w) => w,
            Err(e) => {
                return Ok(SubmitOutcome::Rejected {
                    message: e.to_string(),
                });
            }
        };

        let id = workout.id.clone();
        self.map.add_marker(workout.coords, &workout.description);
        self.workouts.push(workout);
        self.store.save(&self.workouts)?;

        dlog!("recorded workout id={id}");
        Ok(SubmitOutcome::Recorded { id })
    }

    /// Re-centers the map on the workout and counts the interaction.
    /// Returns false if the id matches nothing.
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(w) = self.workouts.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        self.map.set_view(w.coords, DEFAULT_ZOOM);
        w.record_interaction();
        true
    }

    /// Drops the persisted record and the in-memory collection.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.workouts.clear();
        tracing::info!("workout list cleared");
        Ok(())
    }

    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    const PIN: Coords = Coords {
        lat: 39.0,
        lng: -12.0,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum MapCall {
        SetView(Coords, u8),
        AddMarker(Coords, String),
    }

    #[derive(Default)]
    struct RecordingMap {
        calls: Rc<RefCell<Vec<MapCall>>>,
    }

    impl MapView for RecordingMap {
        fn set_view(&mut self, coords: Coords, zoom: u8) {
            self.calls.borrow_mut().push(MapCall::SetView(coords, zoom));
        }

        fn add_marker(&mut self, coords: Coords, popup: &str) {
            self.calls
                .borrow_mut()
                .push(MapCall::AddMarker(coords, popup.to_string()));
        }
    }

    fn running_form() -> FormSubmission {
        FormSubmission {
            kind: Kind::Running,
            distance: 5.2,
            duration: 24.0,
            cadence_or_elevation: 178.0,
            click_coords: PIN,
        }
    }

    #[test]
    fn submit_records_renders_and_persists() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let map = RecordingMap {
            calls: Rc::clone(&calls),
        };
        let mut app = App::start(MemoryStore::new(), map).unwrap();

        let outcome = app.submit(running_form()).unwrap();
        let SubmitOutcome::Recorded { id } = outcome else {
            panic!("valid submission was rejected");
        };

        assert_eq!(app.workouts().len(), 1);
        assert_eq!(app.workouts()[0].id, id);

        let description = app.workouts()[0].description.clone();
        assert_eq!(
            calls.borrow().as_slice(),
            &[MapCall::AddMarker(PIN, description)]
        );
    }

    #[test]
    fn a_restarted_app_sees_what_the_first_one_saved() {
        let mut medium = MemoryStore::new();
        {
            let mut app = App::start(&mut medium, RecordingMap::default()).unwrap();
            app.submit(running_form()).unwrap();
            app.submit(FormSubmission {
                kind: Kind::Cycling,
                distance: 27.0,
                duration: 95.0,
                cadence_or_elevation: 523.0,
                click_coords: PIN,
            })
            .unwrap();
        }

        let calls = Rc::new(RefCell::new(Vec::new()));
        let map = RecordingMap {
            calls: Rc::clone(&calls),
        };
        let app = App::start(&mut medium, map).unwrap();

        assert_eq!(app.workouts().len(), 2);
        assert_eq!(app.workouts()[0].kind(), Kind::Running);
        assert_eq!(app.workouts()[1].kind(), Kind::Cycling);
        // One marker per reconstituted workout, in insertion order.
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn rejected_submission_leaves_no_trace() {
        let mut app = App::start(MemoryStore::new(), RecordingMap::default()).unwrap();

        let outcome = app
            .submit(FormSubmission {
                distance: -5.0,
                ..running_form()
            })
            .unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: "distance has to be a positive number".to_string()
            }
        );
        assert!(app.workouts().is_empty());
    }

    #[test]
    fn focus_centers_the_map_and_counts_the_click() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let map = RecordingMap {
            calls: Rc::clone(&calls),
        };
        let mut app = App::start(MemoryStore::new(), map).unwrap();

        let SubmitOutcome::Recorded { id } = app.submit(running_form()).unwrap() else {
            panic!("valid submission was rejected");
        };

        assert!(app.focus(&id));
        assert!(!app.focus("no-such-id"));

        assert_eq!(app.workouts()[0].clicks, 1);
        assert_eq!(
            calls.borrow().last(),
            Some(&MapCall::SetView(PIN, DEFAULT_ZOOM))
        );
    }

    #[test]
    fn reset_clears_memory_and_medium() {
        let mut medium = MemoryStore::new();
        {
            let mut app = App::start(&mut medium, RecordingMap::default()).unwrap();
            app.submit(running_form()).unwrap();
            app.reset().unwrap();
            assert!(app.workouts().is_empty());
        }

        let app = App::start(&mut medium, RecordingMap::default()).unwrap();
        assert!(app.workouts().is_empty());
    }
}
