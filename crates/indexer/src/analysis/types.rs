use crate::analysis::naming::QualifiedName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One declared class of a source unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    /// Unique within its unit, not globally
    pub name: String,
    /// Stored as written; not checked against known classes
    pub superclass_name: Option<String>,
    pub fields: Vec<FieldModel>,
    pub methods: Vec<MethodModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterModel {
    pub type_name: String,
    pub param_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    pub parameters: Vec<ParameterModel>,
    /// One line per top-level body statement; empty for bodiless methods
    pub behavior_summary: Vec<String>,
    /// Methods invoked by a whole top-level statement, qualified with the declaring unit
    pub called_method_ids: BTreeSet<QualifiedName>,
}

/// Caller -> callees for the methods of one unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallIndex {
    calls: BTreeMap<QualifiedName, BTreeSet<QualifiedName>>,
}

impl CallIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the callees of `caller`. A caller seen again replaces its
    /// earlier entry, so overloads collapse onto the last declaration.
    pub fn insert(&mut self, caller: QualifiedName, callees: BTreeSet<QualifiedName>) {
        self.calls.insert(caller, callees);
    }

    pub fn callees(&self, caller: &QualifiedName) -> Option<&BTreeSet<QualifiedName>> {
        self.calls.get(caller)
    }

    pub fn callers(&self) -> impl Iterator<Item = &QualifiedName> {
        self.calls.keys()
    }

    /// Every `(caller, callee)` pair in key order
    pub fn edges(&self) -> impl Iterator<Item = (&QualifiedName, &QualifiedName)> {
        self.calls
            .iter()
            .flat_map(|(caller, callees)| callees.iter().map(move |callee| (caller, callee)))
    }

    pub fn edge_count(&self) -> usize {
        self.calls.values().map(BTreeSet::len).sum()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Everything extracted from one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub classes: Vec<ClassModel>,
    pub call_index: CallIndex,
}

impl Extraction {
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|class| class.methods.len()).sum()
    }
}
