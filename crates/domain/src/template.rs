use chrono::{DateTime, Utc};

use crate::{BlockID, EditError, ExerciseID, Name, SetID, TemplateID, parse_duration};

pub const DEFAULT_REST_SEC: u32 = 90;
pub const DEFAULT_SET_REPS: u32 = 8;
pub const DEFAULT_SET_COUNT: usize = 3;
pub const MIN_GROUP_EXERCISES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: TemplateID,
    pub name: Name,
    pub blocks: Vec<Block>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Template {
    #[must_use]
    pub fn new(name: Name, now: DateTime<Utc>) -> Self {
        Self {
            id: TemplateID::generate(),
            name,
            blocks: vec![],
            updated_at: Some(now),
        }
    }

    #[must_use]
    pub fn stats(&self) -> TemplateStats {
        TemplateStats {
            exercise_count: self.blocks.iter().map(|b| b.exercises().len()).sum(),
            set_count: self.blocks.iter().map(Block::set_count).sum(),
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = Name::or_untitled(name);
    }

    #[must_use]
    pub fn block(&self, id: &BlockID) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn block_mut(&mut self, id: &BlockID) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id() == id)
    }

    pub fn add_single_block(&mut self) -> BlockID {
        let block = Block::new_single();
        let id = block.id().clone();
        self.blocks.push(block);
        id
    }

    pub fn add_group_block(&mut self) -> BlockID {
        let block = Block::new_group();
        let id = block.id().clone();
        self.blocks.push(block);
        id
    }

    pub fn remove_block(&mut self, id: &BlockID) -> Option<Block> {
        let position = self.blocks.iter().position(|b| b.id() == id)?;
        Some(self.blocks.remove(position))
    }

    pub fn reorder_blocks(&mut self, ids: &[BlockID]) {
        self.blocks = reorder(std::mem::take(&mut self.blocks), ids, Block::id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStats {
    pub exercise_count: usize,
    pub set_count: usize,
}

/// A unit of a template: either one exercise or a group performed round by round.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<S = Set> {
    Single {
        id: BlockID,
        rest_sec: u32,
        exercise: Exercise<S>,
    },
    Group {
        id: BlockID,
        rest_sec: u32,
        exercises: Vec<Exercise<S>>,
    },
}

impl<S> Block<S> {
    #[must_use]
    pub fn id(&self) -> &BlockID {
        match self {
            Block::Single { id, .. } | Block::Group { id, .. } => id,
        }
    }

    #[must_use]
    pub fn rest_sec(&self) -> u32 {
        match self {
            Block::Single { rest_sec, .. } | Block::Group { rest_sec, .. } => *rest_sec,
        }
    }

    pub fn set_rest_sec(&mut self, seconds: u32) {
        match self {
            Block::Single { rest_sec, .. } | Block::Group { rest_sec, .. } => *rest_sec = seconds,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Block::Group { .. })
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise<S>] {
        match self {
            Block::Single { exercise, .. } => std::slice::from_ref(exercise),
            Block::Group { exercises, .. } => exercises,
        }
    }

    pub fn exercises_mut(&mut self) -> &mut [Exercise<S>] {
        match self {
            Block::Single { exercise, .. } => std::slice::from_mut(exercise),
            Block::Group { exercises, .. } => exercises,
        }
    }

    #[must_use]
    pub fn rounds(&self) -> usize {
        group_rounds(self.exercises())
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.exercises().iter().map(|e| e.sets.len()).sum()
    }

    pub(crate) fn map_sets<T>(&self, f: impl Fn(&S) -> T + Copy) -> Block<T> {
        match self {
            Block::Single {
                id,
                rest_sec,
                exercise,
            } => Block::Single {
                id: id.clone(),
                rest_sec: *rest_sec,
                exercise: exercise.map_sets(f),
            },
            Block::Group {
                id,
                rest_sec,
                exercises,
            } => Block::Group {
                id: id.clone(),
                rest_sec: *rest_sec,
                exercises: exercises.iter().map(|e| e.map_sets(f)).collect(),
            },
        }
    }
}

impl Block {
    #[must_use]
    pub fn new_single() -> Self {
        Block::Single {
            id: BlockID::generate(),
            rest_sec: DEFAULT_REST_SEC,
            exercise: Exercise::new("New exercise", DEFAULT_SET_COUNT),
        }
    }

    #[must_use]
    pub fn new_group() -> Self {
        Block::Group {
            id: BlockID::generate(),
            rest_sec: DEFAULT_REST_SEC,
            exercises: vec![
                Exercise::new("Exercise A", DEFAULT_SET_COUNT),
                Exercise::new("Exercise B", DEFAULT_SET_COUNT),
            ],
        }
    }

    /// Unparseable text resets the rest to the default.
    pub fn set_rest_text(&mut self, text: &str) {
        self.set_rest_sec(parse_duration(Some(text), i64::from(DEFAULT_REST_SEC)));
    }

    pub fn exercise_mut(&mut self, id: &ExerciseID) -> Option<&mut Exercise> {
        self.exercises_mut().iter_mut().find(|e| e.id == *id)
    }

    /// Append one set to every exercise of a group.
    pub fn add_round(&mut self) -> bool {
        let Block::Group { exercises, .. } = self else {
            return false;
        };
        for exercise in exercises {
            exercise.add_set();
        }
        true
    }

    /// Shorten the longest exercises of a group by one set, keeping at least one set each.
    pub fn remove_round(&mut self) -> bool {
        let rounds = self.rounds();
        let Block::Group { exercises, .. } = self else {
            return false;
        };
        let mut removed = false;
        for exercise in exercises {
            if exercise.sets.len() == rounds && exercise.sets.len() > 1 {
                exercise.sets.pop();
                removed = true;
            }
        }
        removed
    }

    pub fn add_exercise(&mut self) -> Option<ExerciseID> {
        let rounds = self.rounds();
        let Block::Group { exercises, .. } = self else {
            return None;
        };
        let mut exercise = Exercise::new(
            &format!("Exercise {}", exercises.len() + 1),
            DEFAULT_SET_COUNT,
        );
        while exercise.sets.len() < rounds {
            exercise.sets.push(Set::default());
        }
        let id = exercise.id.clone();
        exercises.push(exercise);
        Some(id)
    }

    /// Returns `Ok(None)` if no exercise with the given id is part of the group.
    pub fn remove_exercise(&mut self, id: &ExerciseID) -> Result<Option<Exercise>, EditError> {
        match self {
            Block::Single { .. } => Err(EditError::GroupTooSmall),
            Block::Group { exercises, .. } => {
                if exercises.len() <= MIN_GROUP_EXERCISES {
                    return Err(EditError::GroupTooSmall);
                }
                Ok(exercises
                    .iter()
                    .position(|e| e.id == *id)
                    .map(|position| exercises.remove(position)))
            }
        }
    }

    pub fn reorder_exercises(&mut self, ids: &[ExerciseID]) {
        if let Block::Group { exercises, .. } = self {
            *exercises = reorder(std::mem::take(exercises), ids, |e| &e.id);
        }
    }
}

#[must_use]
pub fn group_label(exercise_count: usize) -> &'static str {
    match exercise_count {
        0 | 1 => "Group",
        2 => "Superset",
        3 => "Tri-set",
        _ => "Circuit",
    }
}

/// The number of rounds is given by the exercise with the most sets.
#[must_use]
pub fn group_rounds<S>(exercises: &[Exercise<S>]) -> usize {
    exercises
        .iter()
        .map(|e| e.sets.len())
        .max()
        .unwrap_or_default()
        .max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise<S = Set> {
    pub id: ExerciseID,
    pub name: String,
    pub sets: Vec<S>,
}

impl<S> Exercise<S> {
    fn map_sets<T>(&self, f: impl Fn(&S) -> T) -> Exercise<T> {
        Exercise {
            id: self.id.clone(),
            name: self.name.clone(),
            sets: self.sets.iter().map(f).collect(),
        }
    }
}

impl<S: AsRef<Set>> Exercise<S> {
    /// E.g. "3 sets · 8 reps · 80" or "4 sets · reps vary".
    #[must_use]
    pub fn summary(&self) -> String {
        let sets = self.sets.iter().map(AsRef::<Set>::as_ref).collect::<Vec<_>>();
        let mut parts = vec![format!("{} sets", sets.len())];

        if let Some(first) = sets.first() {
            if sets.iter().all(|s| s.reps == first.reps) {
                parts.push(format!("{} reps", first.reps));
            } else {
                parts.push("reps vary".to_string());
            }
        }

        let weights = sets
            .iter()
            .map(|s| s.weight.trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>();
        if let Some(first) = weights.first() {
            if weights.iter().all(|w| w == first) {
                parts.push((*first).to_string());
            } else {
                parts.push("weight vary".to_string());
            }
        }

        parts.join(" \u{b7} ")
    }
}

impl Exercise {
    #[must_use]
    pub fn new(name: &str, set_count: usize) -> Self {
        Self {
            id: ExerciseID::generate(),
            name: name.to_string(),
            sets: (0..set_count.max(1)).map(|_| Set::default()).collect(),
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    #[must_use]
    pub fn set(&self, id: &SetID) -> Option<&Set> {
        self.sets.iter().find(|s| s.id == *id)
    }

    pub fn set_mut(&mut self, id: &SetID) -> Option<&mut Set> {
        self.sets.iter_mut().find(|s| s.id == *id)
    }

    /// Append a set with the reps and weight of the last set.
    pub fn add_set(&mut self) -> SetID {
        let set = self.sets.last().map_or_else(Set::default, Set::successor);
        let id = set.id.clone();
        self.sets.push(set);
        id
    }

    /// The last remaining set is never removed.
    pub fn remove_last_set(&mut self) -> bool {
        if self.sets.len() <= 1 {
            return false;
        }
        self.sets.pop();
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    pub id: SetID,
    pub reps: u32,
    pub weight: String,
}

impl Set {
    #[must_use]
    pub fn new(reps: u32, weight: &str) -> Self {
        Self {
            id: SetID::generate(),
            reps,
            weight: weight.to_string(),
        }
    }

    #[must_use]
    pub fn successor(&self) -> Self {
        Self::new(self.reps, &self.weight)
    }

    /// Leading digits are taken as reps, anything else yields zero.
    pub fn set_reps_text(&mut self, text: &str) {
        let digits = text
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>();
        self.reps = digits.parse().unwrap_or(0);
    }

    pub fn set_weight(&mut self, weight: &str) {
        self.weight = weight.to_string();
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new(DEFAULT_SET_REPS, "")
    }
}

impl AsRef<Set> for Set {
    fn as_ref(&self) -> &Set {
        self
    }
}

/// Arrange `items` in the order of `ids`. Unknown ids are skipped and items without a
/// corresponding id are dropped.
pub fn reorder<T, K: PartialEq>(items: Vec<T>, ids: &[K], key: impl Fn(&T) -> &K) -> Vec<T> {
    let mut items = items.into_iter().map(Some).collect::<Vec<_>>();
    ids.iter()
        .filter_map(|id| {
            let position = items
                .iter()
                .position(|item| item.as_ref().is_some_and(|item| key(item) == id))?;
            items[position].take()
        })
        .collect()
}
