use derive_more::{Deref, DerefMut};

use crate::{Block, Name, Set, Template, TemplateID, WorkoutError};

/// A snapshot of a template that tracks which sets have been done.
///
/// Changes made during a workout never flow back into the template it was started from.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub template_id: TemplateID,
    pub name: Name,
    pub blocks: Vec<Block<WorkoutSet>>,
}

#[derive(Deref, DerefMut, Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSet {
    #[deref]
    #[deref_mut]
    pub set: Set,
    pub is_complete: bool,
}

impl From<&Set> for WorkoutSet {
    fn from(value: &Set) -> Self {
        Self {
            set: value.clone(),
            is_complete: false,
        }
    }
}

impl AsRef<Set> for WorkoutSet {
    fn as_ref(&self) -> &Set {
        &self.set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Single,
    Group,
}

/// Position of a set inside a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub block_index: usize,
    pub exercise_index: usize,
    pub set_index: usize,
    pub kind: TargetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetToggle {
    /// `rest_sec` is set if completing the set should start the rest timer.
    Completed { rest_sec: Option<u32> },
    Reopened,
}

impl Workout {
    pub fn start(template: &Template) -> Result<Self, WorkoutError> {
        if template.blocks.is_empty() {
            return Err(WorkoutError::NoBlocks);
        }
        Ok(Self {
            template_id: template.id.clone(),
            name: template.name.clone(),
            blocks: template
                .blocks
                .iter()
                .map(|b| b.map_sets(|s| WorkoutSet::from(s)))
                .collect(),
        })
    }

    #[must_use]
    pub fn set(
        &self,
        block_index: usize,
        exercise_index: usize,
        set_index: usize,
    ) -> Option<&WorkoutSet> {
        self.blocks
            .get(block_index)?
            .exercises()
            .get(exercise_index)?
            .sets
            .get(set_index)
    }

    pub fn set_mut(
        &mut self,
        block_index: usize,
        exercise_index: usize,
        set_index: usize,
    ) -> Option<&mut WorkoutSet> {
        self.blocks
            .get_mut(block_index)?
            .exercises_mut()
            .get_mut(exercise_index)?
            .sets
            .get_mut(set_index)
    }

    /// Returns `None` if there is no set at the given position.
    pub fn toggle_set_complete(
        &mut self,
        block_index: usize,
        exercise_index: usize,
        set_index: usize,
    ) -> Option<SetToggle> {
        let is_complete = {
            let set = self.set_mut(block_index, exercise_index, set_index)?;
            set.is_complete = !set.is_complete;
            set.is_complete
        };

        if !is_complete {
            return Some(SetToggle::Reopened);
        }

        let block = &self.blocks[block_index];
        let rest_sec = match block {
            Block::Single { rest_sec, .. } => Some(*rest_sec),
            Block::Group { rest_sec, .. } => block.is_round_complete(set_index).then_some(*rest_sec),
        };

        Some(SetToggle::Completed { rest_sec })
    }

    /// The first incomplete set, visiting group blocks round by round.
    #[must_use]
    pub fn find_next_target(&self) -> Option<Target> {
        for (block_index, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Single { exercise, .. } => {
                    if let Some(set_index) = exercise.sets.iter().position(|s| !s.is_complete) {
                        return Some(Target {
                            block_index,
                            exercise_index: 0,
                            set_index,
                            kind: TargetKind::Single,
                        });
                    }
                }
                Block::Group { exercises, .. } => {
                    for round in 0..block.rounds() {
                        for (exercise_index, exercise) in exercises.iter().enumerate() {
                            if exercise.sets.get(round).is_some_and(|s| !s.is_complete) {
                                return Some(Target {
                                    block_index,
                                    exercise_index,
                                    set_index: round,
                                    kind: TargetKind::Group,
                                });
                            }
                        }
                    }
                }
            }
        }
        None
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.find_next_target().is_none()
    }

    /// Number of completed sets and total number of sets.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let sets = self
            .blocks
            .iter()
            .flat_map(Block::exercises)
            .flat_map(|e| e.sets.iter())
            .collect::<Vec<_>>();
        (sets.iter().filter(|s| s.is_complete).count(), sets.len())
    }
}

impl Block<WorkoutSet> {
    /// Exercises without a set in this round do not hold it back.
    #[must_use]
    pub fn is_round_complete(&self, round: usize) -> bool {
        self.exercises()
            .iter()
            .all(|e| e.sets.get(round).is_none_or(|s| s.is_complete))
    }
}
