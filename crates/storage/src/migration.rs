//! Upgrade previously persisted data of any shape to a valid store.
//!
//! Missing or unusable fields are replaced by defaults. Older data kept the rest duration on
//! exercises or sets of single blocks; it is moved to the block.

use chrono::DateTime;
use serde_json::{Map, Value};
use wechill_domain::{
    self as domain, BlockID, DEFAULT_REST_SEC, DEFAULT_SET_COUNT, DEFAULT_SET_REPS, ExerciseID,
    Name, SetID, TemplateID, parse_duration,
};

const EXERCISE_NAME: &str = "Exercise";
const NEW_EXERCISE_NAME: &str = "New exercise";

#[must_use]
pub fn normalize(value: &Value) -> domain::Store {
    let mut store = domain::Store::default();
    let Some(templates_by_user) = value
        .as_object()
        .and_then(|store| store.get("templatesByUser"))
        .and_then(Value::as_object)
    else {
        return store;
    };
    for (user, templates) in templates_by_user {
        store.set_templates(user, objects(templates).map(template).collect());
    }
    store
}

fn template(value: &Map<String, Value>) -> domain::Template {
    domain::Template {
        id: id(value).map_or_else(TemplateID::generate, TemplateID::from),
        name: text(value.get("name")).map_or_else(Name::untitled, |name| Name::or_untitled(&name)),
        blocks: value.get("blocks").map(objects).into_iter().flatten().map(block).collect(),
        updated_at: value
            .get("updatedAt")
            .and_then(Value::as_i64)
            .and_then(DateTime::from_timestamp_millis),
    }
}

fn block(value: &Map<String, Value>) -> domain::Block {
    let id = id(value).map_or_else(BlockID::generate, BlockID::from);

    if value.get("type").and_then(Value::as_str) == Some("group") {
        return domain::Block::Group {
            id,
            rest_sec: rest(value.get("restSec")),
            exercises: value
                .get("exercises")
                .map(objects)
                .into_iter()
                .flatten()
                .map(exercise)
                .collect(),
        };
    }

    let legacy_exercise = value.get("exercise").and_then(Value::as_object);
    let mut exercise = legacy_exercise.map_or_else(
        || domain::Exercise::new(NEW_EXERCISE_NAME, DEFAULT_SET_COUNT),
        exercise,
    );
    if exercise.sets.is_empty() {
        exercise.sets.push(domain::Set::default());
    }

    let legacy_rest = [
        value.get("restSec"),
        legacy_exercise.and_then(|e| e.get("restSec")),
        legacy_exercise
            .and_then(|e| e.get("sets"))
            .and_then(Value::as_array)
            .and_then(|sets| sets.first())
            .and_then(|set| set.get("restSec")),
    ]
    .into_iter()
    .flatten()
    .find(|rest_sec| !rest_sec.is_null());

    domain::Block::Single {
        id,
        rest_sec: rest(legacy_rest),
        exercise,
    }
}

fn exercise(value: &Map<String, Value>) -> domain::Exercise {
    domain::Exercise {
        id: id(value).map_or_else(ExerciseID::generate, ExerciseID::from),
        name: text(value.get("name")).unwrap_or_else(|| EXERCISE_NAME.to_string()),
        sets: value.get("sets").map(objects).into_iter().flatten().map(set).collect(),
    }
}

fn set(value: &Map<String, Value>) -> domain::Set {
    domain::Set {
        id: id(value).map_or_else(SetID::generate, SetID::from),
        reps: value.get("reps").and_then(reps).unwrap_or(DEFAULT_SET_REPS),
        weight: match value.get("weight") {
            Some(Value::String(weight)) => weight.clone(),
            Some(Value::Number(weight)) => weight.to_string(),
            _ => String::new(),
        },
    }
}

/// The object entries of a list. Anything else in the list is skipped.
fn objects(value: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn id(value: &Map<String, Value>) -> Option<String> {
    match value.get("id")? {
        Value::Number(number) => (number.as_i64() != Some(0)).then(|| number.to_string()),
        value => text(Some(value)),
    }
}

/// Non-empty strings and numbers.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn reps(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|reps| u32::try_from(reps).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn rest(value: Option<&Value>) -> u32 {
    let text = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(value) => Some(value.to_string()),
    };
    parse_duration(text.as_deref(), i64::from(DEFAULT_REST_SEC))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::{
        record,
        tests::data::{STORE, STORE_JSON},
    };

    use super::*;

    fn roundtrip(store: &domain::Store) -> Value {
        serde_json::to_value(record::Store::from(store)).unwrap()
    }

    fn first_block(value: Value) -> domain::Block {
        let store = normalize(&json!({"templatesByUser": {"A": [{"blocks": [value]}]}}));
        store.templates("A")[0].blocks[0].clone()
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("store"))]
    #[case(json!([1, 2, 3]))]
    #[case(json!({}))]
    #[case(json!({"version": 1}))]
    #[case(json!({"version": 1, "templatesByUser": []}))]
    #[case(json!({"version": 1, "templatesByUser": "Anton"}))]
    fn test_normalize_invalid_store(#[case] value: Value) {
        assert_eq!(normalize(&value), domain::Store::default());
    }

    #[test]
    fn test_normalize_valid_store() {
        assert_eq!(normalize(&STORE_JSON), *STORE);
    }

    #[test]
    fn test_normalize_template_list() {
        let store = normalize(&json!({
            "templatesByUser": {
                "Anton": "Push",
                "August": [42, null, {"name": "Legs"}, "Pull"]
            }
        }));
        assert_eq!(store.users(), vec!["Anton", "August"]);
        assert!(store.templates("Anton").is_empty());
        let templates = store.templates("August");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name.to_string(), "Legs");
        assert!(!templates[0].id.is_empty());
        assert!(templates[0].blocks.is_empty());
        assert_eq!(templates[0].updated_at, None);
    }

    #[rstest]
    #[case(json!({}), "Untitled")]
    #[case(json!({"name": ""}), "Untitled")]
    #[case(json!({"name": null}), "Untitled")]
    #[case(json!({"name": "  Pull  "}), "Pull")]
    #[case(json!({"name": 5}), "5")]
    fn test_normalize_template_name(#[case] template: Value, #[case] expected: &str) {
        let store = normalize(&json!({"templatesByUser": {"A": [template]}}));
        assert_eq!(store.templates("A")[0].name.to_string(), expected);
    }

    #[rstest]
    #[case(json!({"id": "abc"}), Some("abc"))]
    #[case(json!({"id": 17}), Some("17"))]
    #[case(json!({"id": 0}), None)]
    #[case(json!({"id": ""}), None)]
    #[case(json!({"id": false}), None)]
    #[case(json!({}), None)]
    fn test_id(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(
            id(value.as_object().unwrap()),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn test_normalize_group_block() {
        let block = first_block(json!({
            "id": "g",
            "type": "group",
            "restSec": "1:15",
            "exercises": [
                {"id": "a", "sets": [{"id": "s", "reps": 10, "weight": 20, "restSec": 30}]},
                {"name": "Dip"},
                "junk"
            ]
        }));
        let domain::Block::Group {
            id,
            rest_sec,
            exercises,
        } = block
        else {
            panic!("expected group block");
        };
        assert_eq!(id.to_string(), "g");
        assert_eq!(rest_sec, 75);
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].name, "Exercise");
        assert_eq!(
            exercises[0].sets,
            vec![domain::Set {
                id: "s".into(),
                reps: 10,
                weight: "20".to_string()
            }]
        );
        assert_eq!(exercises[1].name, "Dip");
        assert!(exercises[1].sets.is_empty());
    }

    #[rstest]
    #[case(json!({"type": "group"}), 90)]
    #[case(json!({"type": "group", "restSec": 45}), 45)]
    #[case(json!({"type": "group", "restSec": "soon"}), 90)]
    #[case(json!({"type": "group", "restSec": -5}), 90)]
    fn test_normalize_group_rest(#[case] block: Value, #[case] expected: u32) {
        assert_eq!(first_block(block).rest_sec(), expected);
    }

    #[rstest]
    #[case(json!({"restSec": 60, "exercise": {"restSec": 45, "sets": [{"restSec": 30}]}}), 60)]
    #[case(json!({"exercise": {"restSec": 45, "sets": [{"restSec": 30}]}}), 45)]
    #[case(json!({"restSec": null, "exercise": {"sets": [{"restSec": "0:30"}, {"restSec": 10}]}}), 30)]
    #[case(json!({"exercise": {"sets": [{"reps": 5}, {"restSec": 10}]}}), 90)]
    #[case(json!({"restSec": "bogus", "exercise": {"restSec": 45}}), 90)]
    #[case(json!({}), 90)]
    fn test_normalize_legacy_rest(#[case] block: Value, #[case] expected: u32) {
        assert_eq!(first_block(block).rest_sec(), expected);
    }

    #[test]
    fn test_normalize_single_block() {
        let block = first_block(json!({
            "type": "legacy",
            "exercise": {
                "id": "e",
                "name": "Squat",
                "restSec": 120,
                "sets": [
                    {"id": "s1", "reps": 5, "weight": 100, "restSec": 120},
                    {"reps": "abc"},
                    7
                ]
            }
        }));
        assert!(!block.is_group());
        assert!(!block.id().is_empty());
        assert_eq!(block.rest_sec(), 120);
        let exercise = &block.exercises()[0];
        assert_eq!(exercise.name, "Squat");
        assert_eq!(exercise.sets.len(), 2);
        assert_eq!(exercise.sets[0].weight, "100");
        assert_eq!(exercise.sets[1].reps, 8);
        assert_eq!(exercise.sets[1].weight, "");
        assert!(!exercise.sets[1].id.is_empty());
    }

    #[rstest]
    #[case(json!({}), "New exercise", 3)]
    #[case(json!({"exercise": "Squat"}), "New exercise", 3)]
    #[case(json!({"exercise": {}}), "Exercise", 1)]
    #[case(json!({"exercise": {"name": "Row", "sets": []}}), "Row", 1)]
    fn test_normalize_single_block_exercise(
        #[case] block: Value,
        #[case] name: &str,
        #[case] set_count: usize,
    ) {
        let block = first_block(block);
        assert_eq!(block.exercises()[0].name, name);
        assert_eq!(block.exercises()[0].sets.len(), set_count);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!({"templatesByUser": {"A": [{}, {"blocks": [{}, {"type": "group"}]}]}}))]
    #[case(json!({"templatesByUser": {"A": [{"blocks": [{"restSec": "2:00", "exercise": {"sets": [{"weight": 2.5}]}}]}]}}))]
    fn test_normalize_idempotent(#[case] value: Value) {
        let store = normalize(&value);
        assert_eq!(normalize(&roundtrip(&store)), store);
    }

    #[test]
    fn test_normalized_blocks_are_valid() {
        let store = normalize(&json!({
            "templatesByUser": {
                "A": [{"blocks": [{}, {"type": "group", "exercises": 5}, {"exercise": {"sets": {}}}]}]
            }
        }));
        for block in &store.templates("A")[0].blocks {
            assert!(!block.id().is_empty());
            match block {
                domain::Block::Single { exercise, .. } => assert!(!exercise.sets.is_empty()),
                domain::Block::Group { exercises, .. } => assert!(exercises.is_empty()),
            }
        }
    }

    #[test]
    fn test_normalize_updated_at() {
        let store = normalize(&json!({
            "templatesByUser": {"A": [{"updatedAt": 1_700_000_000_000_i64}, {"updatedAt": "yesterday"}]}
        }));
        assert_eq!(
            store.templates("A")[0].updated_at.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
        assert_eq!(store.templates("A")[1].updated_at, None);
    }
}
