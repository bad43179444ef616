use crate::analysis::types::ClassModel;
use rustc_hash::FxHashMap;

/// A class together with the unit it was last extracted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredClass {
    pub unit_id: String,
    pub model: ClassModel,
}

/// Every class seen so far in a run, keyed by bare class name.
///
/// Iteration follows first insertion. Registering a name again replaces the
/// entry but keeps its position.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    entries: Vec<RegisteredClass>,
    positions: FxHashMap<String, usize>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry that was replaced, if any
    pub fn register(&mut self, unit_id: &str, model: ClassModel) -> Option<RegisteredClass> {
        let entry = RegisteredClass {
            unit_id: unit_id.to_string(),
            model,
        };

        match self.positions.get(&entry.model.name) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position], entry)),
            None => {
                self.positions
                    .insert(entry.model.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn register_all(
        &mut self,
        unit_id: &str,
        models: impl IntoIterator<Item = ClassModel>,
    ) -> usize {
        models
            .into_iter()
            .filter_map(|model| self.register(unit_id, model))
            .count()
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredClass> {
        self.positions
            .get(name)
            .and_then(|&position| self.entries.get(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredClass> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
