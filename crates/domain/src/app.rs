use chrono::{DateTime, Utc};

use crate::{
    Block, BlockID, DEFAULT_REST_SEC, EditError, ExerciseID, MIN_GROUP_EXERCISES, RestTimer,
    Service, Set, SetToggle, StoreRepository, Target, Template, TemplateID, Workout,
};

/// Asks the user before destructive actions and shows blocking notices.
pub trait Dialog {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub user: Option<String>,
    /// Template currently being edited, independent of the stored one until it is saved.
    pub editing: Option<Template>,
    pub workout: Option<Workout>,
    pub rest: RestTimer,
}

type Listener = Box<dyn Fn(&AppState)>;

pub struct App<R, D> {
    service: Service<R>,
    dialog: D,
    state: AppState,
    listeners: Vec<Listener>,
}

impl<R: StoreRepository, D: Dialog> App<R, D> {
    pub fn new(repository: R, dialog: D) -> Self {
        Self {
            service: Service::new(repository),
            dialog,
            state: AppState::default(),
            listeners: vec![],
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn users(&self) -> Vec<&str> {
        self.service.users()
    }

    /// Templates of the selected user.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        self.state
            .user
            .as_deref()
            .map(|user| self.service.templates(user))
            .unwrap_or_default()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn select_user(&mut self, user: &str) {
        self.state.user = Some(user.to_string());
        self.state.editing = None;
        self.notify();
    }

    pub fn create_template(&mut self, now: DateTime<Utc>) -> Option<TemplateID> {
        let user = self.state.user.clone()?;
        let template = self.service.create_template(&user, now);
        let id = template.id.clone();
        self.state.editing = Some(template);
        self.notify();
        Some(id)
    }

    pub fn open_template(&mut self, id: &TemplateID) -> bool {
        let Some(template) = self
            .state
            .user
            .as_deref()
            .and_then(|user| self.service.find_template(user, id))
        else {
            return false;
        };
        self.state.editing = Some(template.clone());
        self.notify();
        true
    }

    /// Apply a change to the template being edited.
    pub fn edit<T>(&mut self, change: impl FnOnce(&mut Template) -> T) -> Option<T> {
        let result = change(self.state.editing.as_mut()?);
        self.notify();
        Some(result)
    }

    pub fn remove_block(&mut self, id: &BlockID) -> bool {
        if self.editing_block(id).is_none() || !self.dialog.confirm("Remove this block?") {
            return false;
        }
        self.edit(|template| template.remove_block(id).is_some())
            .unwrap_or_default()
    }

    pub fn remove_group_exercise(&mut self, block_id: &BlockID, exercise_id: &ExerciseID) -> bool {
        let Some(block) = self.editing_block(block_id) else {
            return false;
        };
        if block.exercises().len() <= MIN_GROUP_EXERCISES {
            self.dialog.alert(&EditError::GroupTooSmall.to_string());
            return false;
        }
        let Some(exercise) = block.exercises().iter().find(|e| e.id == *exercise_id) else {
            return false;
        };
        if !self
            .dialog
            .confirm(&format!("Remove \"{}\" from this group?", exercise.name))
        {
            return false;
        }
        match self.edit(|template| {
            template
                .block_mut(block_id)
                .map(|block| block.remove_exercise(exercise_id))
        }) {
            Some(Some(Ok(removed))) => removed.is_some(),
            Some(Some(Err(err))) => {
                self.dialog.alert(&err.to_string());
                false
            }
            _ => false,
        }
    }

    /// Write the edited template back into the store.
    pub fn save_template(&mut self, now: DateTime<Utc>) -> bool {
        let (Some(user), Some(template)) = (&self.state.user, &mut self.state.editing) else {
            return false;
        };
        template.updated_at = Some(now);
        self.service.commit_template(user, template.clone(), now);
        self.notify();
        true
    }

    pub fn close_editor(&mut self) {
        self.state.editing = None;
        self.notify();
    }

    pub fn delete_template(&mut self, id: &TemplateID) -> bool {
        let Some(user) = self.state.user.clone() else {
            return false;
        };
        let name = self
            .service
            .find_template(&user, id)
            .map_or_else(|| "this template".to_string(), |t| t.name.to_string());
        if !self.dialog.confirm(&format!("Delete \"{name}\"?")) {
            return false;
        }
        let deleted = self.service.delete_template(&user, id).is_some();
        if self.state.editing.as_ref().is_some_and(|t| t.id == *id) {
            self.state.editing = None;
        }
        self.notify();
        deleted
    }

    /// Save the edited template and start a workout from it.
    pub fn start_workout(&mut self, now: DateTime<Utc>) -> bool {
        if !self.save_template(now) {
            return false;
        }
        let Some(template) = self.state.editing.as_ref() else {
            return false;
        };
        match Workout::start(template) {
            Ok(workout) => {
                self.state.workout = Some(workout);
                self.state.rest.set_idle(DEFAULT_REST_SEC);
                self.notify();
                true
            }
            Err(err) => {
                self.dialog.alert(&err.to_string());
                false
            }
        }
    }

    pub fn toggle_set(
        &mut self,
        block_index: usize,
        exercise_index: usize,
        set_index: usize,
    ) -> Option<SetToggle> {
        let toggle = self.state.workout.as_mut()?.toggle_set_complete(
            block_index,
            exercise_index,
            set_index,
        )?;
        if let SetToggle::Completed {
            rest_sec: Some(rest_sec),
        } = toggle
        {
            self.state.rest.start(rest_sec);
        }
        self.notify();
        Some(toggle)
    }

    /// Change reps or weight of a set during the workout. The stored template is not affected.
    pub fn edit_workout_set(
        &mut self,
        block_index: usize,
        exercise_index: usize,
        set_index: usize,
        change: impl FnOnce(&mut Set),
    ) -> bool {
        let Some(set) = self
            .state
            .workout
            .as_mut()
            .and_then(|w| w.set_mut(block_index, exercise_index, set_index))
        else {
            return false;
        };
        change(&mut set.set);
        self.notify();
        true
    }

    #[must_use]
    pub fn next_target(&self) -> Option<Target> {
        self.state.workout.as_ref()?.find_next_target()
    }

    pub fn toggle_rest(&mut self) {
        self.state.rest.toggle();
        self.notify();
    }

    /// Advance the rest countdown by one second.
    pub fn tick(&mut self) {
        if self.state.rest.is_running() {
            self.state.rest.tick();
            self.notify();
        }
    }

    pub fn finish_workout(&mut self) -> bool {
        if !self
            .dialog
            .confirm("Finish this workout? This will clear the active session.")
        {
            return false;
        }
        self.state.workout = None;
        self.state.editing = None;
        self.state.rest.set_idle(DEFAULT_REST_SEC);
        self.notify();
        true
    }

    pub fn reset(&mut self) -> bool {
        if !self
            .dialog
            .confirm("Reset the app session? (Templates stay saved on this device.)")
        {
            return false;
        }
        self.state.user = None;
        self.state.editing = None;
        self.state.workout = None;
        self.state.rest.set_idle(DEFAULT_REST_SEC);
        self.notify();
        true
    }

    fn editing_block(&self, id: &BlockID) -> Option<&Block> {
        self.state.editing.as_ref()?.block(id)
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.state);
        }
    }
}
