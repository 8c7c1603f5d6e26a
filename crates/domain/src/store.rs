use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{StorageError, Template, TemplateID};

pub const STORE_VERSION: u32 = 1;

pub trait StoreRepository {
    /// Never fails. Missing or unusable data yields a valid store.
    fn load_store(&self) -> Store;
    fn save_store(&self, store: &Store) -> Result<(), StorageError>;
}

/// The templates of all users, each list in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub templates_by_user: BTreeMap<String, Vec<Template>>,
}

impl Store {
    #[must_use]
    pub fn users(&self) -> Vec<&str> {
        self.templates_by_user.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn templates(&self, user: &str) -> &[Template] {
        self.templates_by_user
            .get(user)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn set_templates(&mut self, user: &str, templates: Vec<Template>) {
        self.templates_by_user.insert(user.to_string(), templates);
    }

    #[must_use]
    pub fn find_template(&self, user: &str, id: &TemplateID) -> Option<&Template> {
        self.templates(user).iter().find(|t| t.id == *id)
    }

    pub fn insert_template(&mut self, user: &str, template: Template) {
        self.templates_by_user
            .entry(user.to_string())
            .or_default()
            .insert(0, template);
    }

    /// Replace the template with the same id or prepend it if it is absent.
    pub fn commit_template(&mut self, user: &str, mut template: Template, now: DateTime<Utc>) {
        template.updated_at = Some(now);
        let templates = self.templates_by_user.entry(user.to_string()).or_default();
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => templates.insert(0, template),
        }
    }

    pub fn delete_template(&mut self, user: &str, id: &TemplateID) -> Option<Template> {
        let templates = self.templates_by_user.get_mut(user)?;
        let position = templates.iter().position(|t| t.id == *id)?;
        Some(templates.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::Name;

    use super::*;

    fn template(id: &str, name: &str) -> Template {
        Template {
            id: id.into(),
            name: Name::new(name).unwrap(),
            blocks: vec![],
            updated_at: None,
        }
    }

    fn ids(store: &Store, user: &str) -> Vec<String> {
        store
            .templates(user)
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[test]
    fn test_templates_of_unknown_user() {
        let store = Store::default();
        assert!(store.templates("Nobody").is_empty());
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_insert_template_prepends() {
        let mut store = Store::default();
        store.insert_template("Anton", template("a", "A"));
        store.insert_template("Anton", template("b", "B"));
        assert_eq!(ids(&store, "Anton"), vec!["b", "a"]);
        assert_eq!(store.users(), vec!["Anton"]);
    }

    #[test]
    fn test_commit_template_replaces_in_place() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut store = Store::default();
        store.set_templates(
            "Anton",
            vec![template("a", "A"), template("b", "B"), template("c", "C")],
        );
        store.commit_template("Anton", template("b", "Renamed"), now);
        assert_eq!(ids(&store, "Anton"), vec!["a", "b", "c"]);
        let committed = store.find_template("Anton", &"b".into()).unwrap();
        assert_eq!(committed.name.to_string(), "Renamed");
        assert_eq!(committed.updated_at, Some(now));
    }

    #[test]
    fn test_commit_template_prepends_unknown() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut store = Store::default();
        store.set_templates("August", vec![template("a", "A")]);
        store.commit_template("August", template("z", "Z"), now);
        assert_eq!(ids(&store, "August"), vec!["z", "a"]);
        store.commit_template("Anton", template("y", "Y"), now);
        assert_eq!(ids(&store, "Anton"), vec!["y"]);
    }

    #[test]
    fn test_delete_template() {
        let mut store = Store::default();
        store.set_templates("Anton", vec![template("a", "A"), template("b", "B")]);
        assert_eq!(
            store
                .delete_template("Anton", &"a".into())
                .map(|t| t.id.to_string()),
            Some("a".to_string())
        );
        assert_eq!(store.delete_template("Anton", &"a".into()), None);
        assert_eq!(store.delete_template("August", &"b".into()), None);
        assert_eq!(ids(&store, "Anton"), vec!["b"]);
    }
}
