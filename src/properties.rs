/*!
 * Property schema management and string interning.
 *
 * TMX units carry open-ended key/value metadata. The schema manager
 * assigns every distinct key a stable index so pairs can store their
 * values in a flat slot vector and grid consumers can build columns
 * from the key list. The string pool dedupes the values, which repeat
 * heavily across tens of thousands of pairs.
 *
 * Both are plain instances created per read operation and passed in
 * explicitly; there is no process-wide state.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

/// One property column: its key, at the schema index it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropInfo {
    pub key: String,
}

#[derive(Debug, Default)]
struct SchemaInner {
    indices: HashMap<String, usize>,
    infos: Vec<PropInfo>,
}

/// Assigns each distinct property key a stable index, first come first
/// served. Thread safe; shared by all workers of one read.
#[derive(Debug, Default)]
pub struct PropertySchema {
    inner: Mutex<SchemaInner>,
}

impl PropertySchema {
    pub fn new() -> Self {
        PropertySchema::default()
    }

    /// The index for `key`, assigning the next free one on first use.
    pub fn index_of(&self, key: &str) -> usize {
        let mut inner = self.inner.lock();
        if let Some(&index) = inner.indices.get(key) {
            return index;
        }
        let index = inner.infos.len();
        inner.indices.insert(key.to_owned(), index);
        inner.infos.push(PropInfo { key: key.to_owned() });
        index
    }

    /// Stores `value` under `key` in a slot vector, growing it as
    /// needed. A later put under the same key shadows the earlier one.
    pub fn put(&self, slots: &mut Vec<Option<Arc<str>>>, key: &str, value: Arc<str>) {
        let index = self.index_of(key);
        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(value);
    }

    /// A snapshot of the known keys, in index order.
    pub fn keys(&self) -> Vec<PropInfo> {
        self.inner.lock().infos.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A thread-safe interning pool for property values.
#[derive(Debug, Default)]
pub struct StringPool {
    entries: Mutex<HashSet<Arc<str>>>,
}

impl StringPool {
    pub fn new() -> Self {
        StringPool::default()
    }

    /// Returns the pooled copy of `value`, inserting it on first sight.
    pub fn intern(&self, value: &str) -> Arc<str> {
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(value) {
            return Arc::clone(hit);
        }
        let entry: Arc<str> = Arc::from(value);
        entries.insert(Arc::clone(&entry));
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
