#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod app;
mod duration;
mod error;
mod id;
mod name;
mod rest_timer;
mod seed;
mod service;
mod store;
mod template;
mod workout;

pub use app::{App, AppState, Dialog};
pub use duration::{format_duration, parse_duration};
pub use error::{EditError, StorageError, WorkoutError};
pub use id::{BlockID, ExerciseID, SetID, TemplateID, generate_id};
pub use name::{Name, NameError, UNTITLED};
pub use rest_timer::{RestState, RestTimer};
pub use service::{NEW_TEMPLATE_NAME, Service};
pub use store::{STORE_VERSION, Store, StoreRepository};
pub use template::{
    Block, DEFAULT_REST_SEC, DEFAULT_SET_COUNT, DEFAULT_SET_REPS, Exercise, MIN_GROUP_EXERCISES,
    Set, Template, TemplateStats, group_label, group_rounds, reorder,
};
pub use workout::{SetToggle, Target, TargetKind, Workout, WorkoutSet};
