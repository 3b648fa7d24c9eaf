// src/config/model.rs

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::config::merge::merge_value;

/// The merged configuration tree.
///
/// Two keys are recognised at the top level:
///
/// ```json
/// {
///   "files": [ { "path": "src/app.c", "processor": "build", "target": "app" } ],
///   "processors": { "build": "gcc {{path}} -o {{target}}" }
/// }
/// ```
///
/// The tree is held as a raw [`Value`] so that configuration layers can
/// carry arbitrary extra fields and still merge cleanly; the typed accessors
/// below are the only views the watcher and executor use. No schema
/// validation beyond "the file is valid JSON" is performed.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: Value,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            root: json!({ "files": [], "processors": {} }),
        }
    }

    /// Recursively merge a configuration layer into the tree.
    ///
    /// Keys absent from `incoming` are never touched; object-into-object
    /// merges recurse; any other incoming value (scalar, array, null)
    /// replaces the existing value outright. Cannot fail on well-formed
    /// input, and merging an empty object is the identity.
    pub fn merge(&mut self, incoming: Value) {
        merge_value(incoming, &mut self.root);
    }

    /// The watch entries from `files`, in configured order.
    ///
    /// Entries that do not decode (e.g. missing `path`, or a non-object
    /// element) are skipped with a warning rather than failing the whole
    /// list.
    pub fn files(&self) -> Vec<WatchEntry> {
        let Some(entries) = self.root.get("files").and_then(Value::as_array) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|raw| match serde_json::from_value(raw.clone()) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(%err, "skipping malformed watch entry");
                    None
                }
            })
            .collect()
    }

    /// Look up the command template for a processor name.
    pub fn processor_template(&self, name: &str) -> Option<&str> {
        self.root
            .get("processors")
            .and_then(|procs| procs.get(name))
            .and_then(Value::as_str)
    }

    /// The raw merged tree.
    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// One path under observation, plus the processor(s) to run on change and
/// arbitrary extra fields usable as substitution values.
///
/// Paths are not required to be unique across entries; each registered
/// watch is independently torn down by path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchEntry {
    pub path: String,

    #[serde(default)]
    pub processor: Option<ProcessorRef>,

    /// Everything else from the entry object (e.g. `"target": "app"`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WatchEntry {
    /// The full field set of this entry as a substitution argument map,
    /// `path` and `processor` included.
    pub fn as_args(&self) -> Map<String, Value> {
        let mut args = self.extra.clone();
        args.insert("path".to_string(), Value::String(self.path.clone()));
        if let Some(processor) = &self.processor {
            args.insert("processor".to_string(), processor.to_value());
        }
        args
    }
}

/// A watch entry's `processor` field: a single processor name or a list of
/// names executed in order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProcessorRef {
    One(String),
    Many(Vec<String>),
}

impl ProcessorRef {
    /// The referenced names, in execution order.
    pub fn names(&self) -> &[String] {
        match self {
            ProcessorRef::One(name) => std::slice::from_ref(name),
            ProcessorRef::Many(names) => names,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            ProcessorRef::One(name) => Value::String(name.clone()),
            ProcessorRef::Many(names) => Value::Array(
                names.iter().map(|n| Value::String(n.clone())).collect(),
            ),
        }
    }
}
