//! Insertion-ordered dictionary.
//!
//! Entries live in a vector in insertion order; a side index maps hashed
//! object keys to slots for O(1) access. Deletion leaves a tombstone so the
//! remaining entries keep their relative order without shifting slots.

use rustc_hash::FxHashMap;

use crate::runtime::object::Object;

/// Hashable digest of a key object: kind tag plus canonical repr. Two keys
/// collide exactly when they are the same kind with the same canonical form,
/// which matches the language's strict equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    kind: &'static str,
    repr: String,
}

impl ObjectKey {
    pub fn of(object: &Object) -> Self {
        Self {
            kind: object.kind_name(),
            repr: object.to_repr(),
        }
    }
}

#[derive(Debug, Clone)]
struct DictEntry {
    key: Object,
    value: Object,
}

#[derive(Debug, Default)]
pub struct DictObject {
    entries: Vec<Option<DictEntry>>,
    index: FxHashMap<ObjectKey, usize>,
}

impl DictObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Inserts or reassigns. Reassigning an existing key keeps its slot, so
    /// iteration order never changes on update.
    pub fn set(&mut self, key: &Object, value: Object) {
        let digest = ObjectKey::of(key);
        if let Some(&slot) = self.index.get(&digest) {
            if let Some(entry) = &mut self.entries[slot] {
                entry.value = value;
                return;
            }
        }
        let slot = self.entries.len();
        self.entries.push(Some(DictEntry {
            key: key.clone(),
            value,
        }));
        self.index.insert(digest, slot);
    }

    pub fn get(&self, key: &Object) -> Option<Object> {
        let slot = *self.index.get(&ObjectKey::of(key))?;
        self.entries[slot].as_ref().map(|entry| entry.value.clone())
    }

    pub fn contains(&self, key: &Object) -> bool {
        self.index.contains_key(&ObjectKey::of(key))
    }

    /// Removes a key, returning its value. The slot becomes a tombstone.
    pub fn delete(&mut self, key: &Object) -> Option<Object> {
        let slot = self.index.remove(&ObjectKey::of(key))?;
        self.entries[slot].take().map(|entry| entry.value)
    }

    /// Key/value pairs in insertion order, skipping tombstones.
    pub fn iter(&self) -> impl Iterator<Item = (&Object, &Object)> {
        self.entries
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Deep copy: keys and values are cloned entry by entry, order kept.
    /// Shared containers inside the dict are duplicated, not aliased.
    pub fn deep_clone(&self) -> DictObject {
        let mut clone = DictObject::new();
        for (key, value) in self.iter() {
            clone.set(&deep_clone_object(key), deep_clone_object(value));
        }
        clone
    }

    pub fn value_eq(&self, other: &DictObject) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|((ka, va), (kb, vb))| {
            ka.value_eq(kb) && va.value_eq(vb)
        })
    }

    pub fn to_repr(&self) -> String {
        let parts: Vec<String> = self
            .iter()
            .map(|(key, value)| format!("{}: {}", key.to_repr(), value.to_repr()))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

fn deep_clone_object(object: &Object) -> Object {
    match object {
        Object::List(elements) => {
            Object::list(elements.borrow().iter().map(deep_clone_object).collect())
        }
        Object::Dict(dict) => Object::dict(dict.borrow().deep_clone()),
        _ => object.clone(),
    }
}
