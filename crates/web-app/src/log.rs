use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};
use wechill_domain::StorageError;
use wechill_storage::{Backend, Key};

pub const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<dyn Repository>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, StorageError>;
    fn write_entry(&self, entry: Entry) -> Result<(), StorageError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Keeps the newest log entries, most recent first.
pub struct LogBook<B> {
    backend: B,
}

impl<B: Backend> LogBook<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend + Send + Sync + 'static> Repository for LogBook<B> {
    fn read_entries(&self) -> Result<VecDeque<Entry>, StorageError> {
        match self.backend.read(Key::Log)? {
            Some(value) => {
                serde_json::from_value(value).map_err(|err| StorageError::Malformed(err.to_string()))
            }
            None => Ok(VecDeque::new()),
        }
    }

    fn write_entry(&self, entry: Entry) -> Result<(), StorageError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Malformed(_)) => VecDeque::new(),
            Err(err) => return Err(err),
        };
        entries.push_front(entry);
        entries.truncate(MAX_ENTRIES);
        let value =
            serde_json::to_value(entries).map_err(|err| StorageError::Other(Box::new(err)))?;
        self.backend.write(Key::Log, &value)
    }
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(repository: Arc<dyn Repository>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        match record.level() {
            Level::Error => gloo_console::error!(message.clone()),
            Level::Warn => gloo_console::warn!(message.clone()),
            Level::Info => gloo_console::info!(message.clone()),
            Level::Debug | Level::Trace => gloo_console::debug!(message.clone()),
        }

        if let Ok(log) = LOG.lock() {
            if let Some(ref log) = *log {
                let _ = log.write_entry(Entry {
                    time: Local::now().format("%b %d %H:%M:%S").to_string(),
                    level: record.level(),
                    message,
                });
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wechill_storage::memory::Memory;

    use super::*;

    fn entry(message: &str) -> Entry {
        Entry {
            time: "Mar 01 12:00:00".to_string(),
            level: Level::Warn,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_serialize_entry() {
        assert_eq!(
            serde_json::to_value(entry("quota exceeded")).unwrap(),
            json!({"time": "Mar 01 12:00:00", "level": "Warn", "message": "quota exceeded"})
        );
    }

    #[test]
    fn test_read_empty_log() {
        assert_eq!(
            LogBook::new(Memory::default()).read_entries().unwrap(),
            VecDeque::new()
        );
    }

    #[test]
    fn test_write_entry_newest_first() {
        let log = LogBook::new(Memory::default());
        log.write_entry(entry("a")).unwrap();
        log.write_entry(entry("b")).unwrap();
        assert_eq!(
            log.read_entries().unwrap(),
            VecDeque::from([entry("b"), entry("a")])
        );
    }

    #[test]
    fn test_write_entry_truncates() {
        let log = LogBook::new(Memory::default());
        for i in 0..=MAX_ENTRIES {
            log.write_entry(entry(&i.to_string())).unwrap();
        }
        let entries = log.read_entries().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].message, MAX_ENTRIES.to_string());
        assert_eq!(entries[MAX_ENTRIES - 1].message, "1");
    }

    #[test]
    fn test_write_entry_replaces_malformed_log() {
        let memory = Memory::default();
        memory.insert_raw(Key::Log, "{\"unexpected\": true}");
        let log = LogBook::new(memory);
        log.write_entry(entry("a")).unwrap();
        assert_eq!(log.read_entries().unwrap(), VecDeque::from([entry("a")]));
    }

    #[test]
    fn test_write_entry_unavailable() {
        let log = LogBook::new(Memory::unavailable());
        assert!(matches!(
            log.write_entry(entry("a")),
            Err(StorageError::Unavailable)
        ));
    }
}
