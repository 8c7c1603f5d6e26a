use std::collections::BTreeMap;

use chrono::DateTime;
use wechill_domain as domain;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub version: u32,
    pub templates_by_user: BTreeMap<String, Vec<Template>>,
}

impl From<&domain::Store> for Store {
    fn from(value: &domain::Store) -> Self {
        Self {
            version: domain::STORE_VERSION,
            templates_by_user: value
                .templates_by_user
                .iter()
                .map(|(user, templates)| {
                    (user.clone(), templates.iter().map(Template::from).collect())
                })
                .collect(),
        }
    }
}

impl From<Store> for domain::Store {
    fn from(value: Store) -> Self {
        Self {
            templates_by_user: value
                .templates_by_user
                .into_iter()
                .map(|(user, templates)| {
                    (user, templates.into_iter().map(domain::Template::from).collect())
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl From<&domain::Template> for Template {
    fn from(value: &domain::Template) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            blocks: value.blocks.iter().map(Block::from).collect(),
            updated_at: value.updated_at.map(|t| t.timestamp_millis()),
        }
    }
}

impl From<Template> for domain::Template {
    fn from(value: Template) -> Self {
        Self {
            id: value.id.into(),
            name: domain::Name::or_untitled(&value.name),
            blocks: value.blocks.into_iter().map(domain::Block::from).collect(),
            updated_at: value.updated_at.and_then(DateTime::from_timestamp_millis),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Block {
    Single {
        id: String,
        rest_sec: u32,
        exercise: Exercise,
    },
    Group {
        id: String,
        rest_sec: u32,
        exercises: Vec<Exercise>,
    },
}

impl From<&domain::Block> for Block {
    fn from(value: &domain::Block) -> Self {
        match value {
            domain::Block::Single {
                id,
                rest_sec,
                exercise,
            } => Block::Single {
                id: id.to_string(),
                rest_sec: *rest_sec,
                exercise: exercise.into(),
            },
            domain::Block::Group {
                id,
                rest_sec,
                exercises,
            } => Block::Group {
                id: id.to_string(),
                rest_sec: *rest_sec,
                exercises: exercises.iter().map(Exercise::from).collect(),
            },
        }
    }
}

impl From<Block> for domain::Block {
    fn from(value: Block) -> Self {
        match value {
            Block::Single {
                id,
                rest_sec,
                exercise,
            } => domain::Block::Single {
                id: id.into(),
                rest_sec,
                exercise: exercise.into(),
            },
            Block::Group {
                id,
                rest_sec,
                exercises,
            } => domain::Block::Group {
                id: id.into(),
                rest_sec,
                exercises: exercises.into_iter().map(domain::Exercise::from).collect(),
            },
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: Vec<Set>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl From<Exercise> for domain::Exercise {
    fn from(value: Exercise) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            sets: value.sets.into_iter().map(domain::Set::from).collect(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Set {
    pub id: String,
    pub reps: u32,
    pub weight: String,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            id: value.id.to_string(),
            reps: value.reps,
            weight: value.weight.clone(),
        }
    }
}

impl From<Set> for domain::Set {
    fn from(value: Set) -> Self {
        Self {
            id: value.id.into(),
            reps: value.reps,
            weight: value.weight,
        }
    }
}
