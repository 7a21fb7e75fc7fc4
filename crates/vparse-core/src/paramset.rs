//! Shared-ownership parameter-set table (component C12).
//!
//! Each codec keeps one `ParamSetTable<Id, T>` per parameter-set kind (SPS,
//! PPS, VPS). Insertion overwrites any existing entry for the same
//! identifier, but slice headers that already hold an `Rc` clone of the
//! previous entry keep it alive — the table never blocks on live references,
//! it simply stops being the owner that keeps them reachable by id.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

#[derive(Debug)]
pub struct ParamSetTable<Id, T> {
    entries: HashMap<Id, Rc<T>>,
}

impl<Id, T> Default for ParamSetTable<Id, T>
where
    Id: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<Id, T> ParamSetTable<Id, T>
where
    Id: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts or replaces the parameter set for `id`, returning a shared
    /// reference to the stored copy.
    pub fn insert(&mut self, id: Id, value: T) -> Rc<T> {
        let rc = Rc::new(value);
        self.entries.insert(id, Rc::clone(&rc));
        rc
    }

    pub fn get(&self, id: &Id) -> Option<Rc<T>> {
        self.entries.get(id).cloned()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
