//! Export document types.
//!
//! These types describe what a domain contributes to an exported model
//! description: one data field declaration per input variable and, when
//! statistics are enabled, one univariate statistics record. All maps are
//! `BTreeMap` so serialized output is deterministic.

use crate::checks::check_paired;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operational type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    Categorical,
    Continuous,
}

/// Declared data type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[default]
    String,
    Integer,
    Double,
    Boolean,
}

/// Element type tag of an [`Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayType {
    String,
    Int,
    Real,
}

/// A typed array of already-formatted entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Array {
    #[serde(rename = "type")]
    array_type: ArrayType,
    n: usize,
    values: Vec<String>,
}

impl Array {
    pub fn new(array_type: ArrayType, values: Vec<String>) -> Self {
        Self {
            array_type,
            n: values.len(),
            values,
        }
    }

    pub fn array_type(&self) -> ArrayType {
        self.array_type
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Render the entries as space-separated array text.
    ///
    /// Entries that are empty or contain a space or a double quote are
    /// wrapped in double quotes, with inner quotes escaped as `\"`.
    pub fn content(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if value.is_empty() || value.contains(' ') || value.contains('"') {
                out.push('"');
                out.push_str(&value.replace('"', "\\\""));
                out.push('"');
            } else {
                out.push_str(value);
            }
        }
        out
    }
}

/// Frequency summary of a field, passed through from fitted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Counts {
    frequencies: BTreeMap<String, f64>,
}

impl Counts {
    pub fn new(frequencies: BTreeMap<String, f64>) -> Self {
        Self { frequencies }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.frequencies.get(key).copied()
    }

    pub fn total_freq(&self) -> Option<f64> {
        self.get("totalFreq")
    }

    pub fn missing_freq(&self) -> Option<f64> {
        self.get("missingFreq")
    }

    pub fn invalid_freq(&self) -> Option<f64> {
        self.get("invalidFreq")
    }

    pub fn frequencies(&self) -> &BTreeMap<String, f64> {
        &self.frequencies
    }
}

/// Per-category frequencies as a pair of parallel arrays.
///
/// `arrays[0]` holds the category labels, `arrays[1]` the matching counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscrStats {
    arrays: [Array; 2],
}

impl DiscrStats {
    /// Pair a label array with a count array.
    ///
    /// # Errors
    /// Returns [`DomainError::SizeMismatch`](crate::DomainError::SizeMismatch)
    /// if the arrays differ in length.
    pub fn new(labels: Array, counts: Array) -> Result<Self> {
        check_paired("discretized stats arrays", labels.values(), counts.values())?;
        Ok(Self {
            arrays: [labels, counts],
        })
    }

    pub fn labels(&self) -> &Array {
        &self.arrays[0]
    }

    pub fn counts(&self) -> &Array {
        &self.arrays[1]
    }

    pub fn arrays(&self) -> &[Array] {
        &self.arrays
    }
}

/// Statistics record for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnivariateStats {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Counts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discr_stats: Option<DiscrStats>,
}

/// Declaration of an input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub op_type: OpType,
    pub data_type: DataType,
    /// Valid values, in declaration order.
    pub values: Vec<String>,
}

/// The assembled export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportDocument {
    pub data_fields: BTreeMap<String, DataField>,
    pub univariate_stats: BTreeMap<String, UnivariateStats>,
}

impl ExportDocument {
    /// Serialize the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
