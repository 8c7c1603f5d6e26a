use chrono::{DateTime, Utc};

use crate::{
    Block, BlockID, DEFAULT_REST_SEC, Exercise, ExerciseID, Name, Set, Store, Template, TemplateID,
};

type SeedExercise = (&'static str, &'static [(u32, &'static str)]);
type SeedTemplate = (&'static str, &'static [SeedExercise]);

const SEED: &[(&str, &[SeedTemplate])] = &[
    (
        "Anton",
        &[
            (
                "Push",
                &[
                    ("Bench Press", &[(8, "80"), (8, "80"), (6, "85")]),
                    ("Overhead Press", &[(8, "40"), (8, "40"), (6, "45")]),
                    ("Triceps Pushdown", &[(12, "25"), (12, "25"), (10, "30")]),
                ],
            ),
            (
                "Pull",
                &[
                    ("Pull-Up", &[(6, "BW"), (6, "BW"), (5, "BW")]),
                    ("Barbell Row", &[(10, "60"), (10, "60"), (8, "65")]),
                    ("Biceps Curl", &[(12, "12"), (12, "12"), (10, "14")]),
                ],
            ),
            (
                "Legs",
                &[
                    ("Squat", &[(8, "90"), (8, "90"), (6, "100")]),
                    ("Romanian Deadlift", &[(10, "70"), (10, "70"), (8, "75")]),
                    ("Calf Raise", &[(15, "40"), (15, "40"), (15, "40")]),
                ],
            ),
        ],
    ),
    (
        "August",
        &[
            (
                "Full Body",
                &[
                    ("Front Squat", &[(6, "70"), (6, "70"), (6, "70")]),
                    ("Bench Press", &[(6, "75"), (6, "75"), (6, "75")]),
                    ("Barbell Row", &[(8, "55"), (8, "55"), (8, "55")]),
                    ("Overhead Press", &[(8, "35"), (8, "35"), (8, "35")]),
                    ("Romanian Deadlift", &[(8, "65"), (8, "65"), (8, "65")]),
                ],
            ),
            (
                "Upper Focus",
                &[
                    ("Incline Bench Press", &[(8, "60"), (8, "60"), (8, "60")]),
                    ("Weighted Pull-Up", &[(5, "10"), (5, "10"), (5, "10")]),
                    ("Dumbbell Shoulder Press", &[(10, "20"), (10, "20"), (10, "20")]),
                    ("Cable Row", &[(12, "35"), (12, "35"), (12, "35")]),
                ],
            ),
            (
                "Lower Focus",
                &[
                    ("Back Squat", &[(5, "100"), (5, "100"), (5, "100")]),
                    ("Deadlift", &[(3, "130"), (3, "130"), (3, "130")]),
                    ("Leg Press", &[(12, "160"), (12, "160"), (12, "160")]),
                    ("Calf Raise", &[(15, "45"), (15, "45"), (15, "45")]),
                ],
            ),
        ],
    ),
];

impl Store {
    /// The built-in templates used when nothing has been stored yet.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut store = Store::default();
        for (user, templates) in SEED {
            store.set_templates(
                user,
                templates
                    .iter()
                    .map(|(name, exercises)| Template {
                        id: TemplateID::generate(),
                        name: Name::or_untitled(name),
                        blocks: exercises
                            .iter()
                            .map(|(name, sets)| Block::Single {
                                id: BlockID::generate(),
                                rest_sec: DEFAULT_REST_SEC,
                                exercise: Exercise {
                                    id: ExerciseID::generate(),
                                    name: (*name).to_string(),
                                    sets: sets.iter().map(|(reps, weight)| Set::new(*reps, weight)).collect(),
                                },
                            })
                            .collect(),
                        updated_at: Some(now),
                    })
                    .collect(),
            );
        }
        store
    }
}
