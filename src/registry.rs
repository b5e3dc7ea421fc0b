//! Dedup registry: the set of normalized names already admitted.
//!
//! The registry only records keys. At-most-once admission is the caller's job
//! (`contains` before `admit`); `Store` is the only caller that mutates it.

use crate::record::name_key;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    keys: BTreeSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&name_key(name))
    }

    pub fn admit(&mut self, name: &str) {
        self.keys.insert(name_key(name));
    }

    pub fn release(&mut self, name: &str) {
        self.keys.remove(&name_key(name));
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}
