use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::{Name, StorageError, Store, StoreRepository, Template, TemplateID};

pub const NEW_TEMPLATE_NAME: &str = "New template";

/// Owns the loaded store and writes it back after every mutation.
pub struct Service<R> {
    repository: R,
    store: Store,
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                StorageError::Unavailable => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: StoreRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        let store = repository.load_store();
        Self { repository, store }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn users(&self) -> Vec<&str> {
        self.store.users()
    }

    #[must_use]
    pub fn templates(&self, user: &str) -> &[Template] {
        self.store.templates(user)
    }

    #[must_use]
    pub fn find_template(&self, user: &str, id: &TemplateID) -> Option<&Template> {
        self.store.find_template(user, id)
    }

    pub fn create_template(&mut self, user: &str, now: DateTime<Utc>) -> Template {
        let template = Template::new(Name::or_untitled(NEW_TEMPLATE_NAME), now);
        self.store.insert_template(user, template.clone());
        self.persist();
        template
    }

    pub fn commit_template(&mut self, user: &str, template: Template, now: DateTime<Utc>) {
        self.store.commit_template(user, template, now);
        self.persist();
    }

    pub fn delete_template(&mut self, user: &str, id: &TemplateID) -> Option<Template> {
        let deleted = self.store.delete_template(user, id)?;
        self.persist();
        Some(deleted)
    }

    /// Failures are logged and the in-memory store stays authoritative.
    fn persist(&self) {
        let _ = log_on_error!(self.repository.save_store(&self.store), "save", "templates");
    }
}
