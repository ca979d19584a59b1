//! Extras: named annotation tables whose rows point at model elements.
//!
//! Extra-functional properties (timing, energy, memory footprints, ...) are
//! attached to a model through tables rather than on the elements
//! themselves. Every row carries scalar values plus references to the
//! elements it annotates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::ElementRef;

/// A scalar table or property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// One row of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    #[serde(default)]
    pub values: Vec<Scalar>,
    #[serde(default)]
    pub references: Vec<ElementRef>,
}

impl TableEntry {
    pub fn new(values: Vec<Scalar>, references: Vec<ElementRef>) -> Self {
        Self { values, references }
    }
}

/// A named table of annotation rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub identifier: String,
    /// Column names of the scalar values.
    #[serde(default)]
    pub value_names: Vec<String>,
    /// Column names of the element references.
    #[serde(default)]
    pub reference_names: Vec<String>,
    #[serde(default)]
    pub entries: Vec<TableEntry>,
}

impl Table {
    pub fn new(
        identifier: impl Into<String>,
        value_names: Vec<String>,
        reference_names: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            value_names,
            reference_names,
            entries: Vec::new(),
        }
    }

    /// A table with the same identifier and column names but no rows.
    pub fn empty_like(&self) -> Self {
        Self::new(
            self.identifier.clone(),
            self.value_names.clone(),
            self.reference_names.clone(),
        )
    }

    pub fn push(&mut self, entry: TableEntry) {
        self.entries.push(entry);
    }
}

/// All extras tables of a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Extras {
    /// Total number of rows over all tables.
    pub fn entry_count(&self) -> usize {
        self.tables.iter().map(|t| t.entries.len()).sum()
    }

    pub fn table(&self, identifier: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.identifier == identifier)
    }
}
