//! Feature references passed between domains and the encoder.
//!
//! A [`WildcardFeature`] names an input variable whose value representation
//! is not decided yet. Converting it with [`WildcardFeature::into_categorical`]
//! consumes the placeholder, so a rebound feature can never be rebound again.

use crate::schema::DataType;
use std::collections::HashSet;

/// Placeholder for an input variable that has not been typed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardFeature {
    name: String,
    data_type: DataType,
}

impl WildcardFeature {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Bind this placeholder to a fixed, ordered set of category labels.
    pub fn into_categorical(self, categories: Vec<String>) -> CategoricalFeature {
        CategoricalFeature {
            name: self.name,
            data_type: self.data_type,
            categories,
        }
    }
}

/// A feature whose values are drawn from a fixed, ordered label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalFeature {
    name: String,
    data_type: DataType,
    categories: Vec<String>,
}

impl CategoricalFeature {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns true if any label occurs more than once.
    pub fn has_duplicate_categories(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.categories.len());
        !self.categories.iter().all(|c| seen.insert(c.as_str()))
    }
}

/// Element of the feature lists exchanged with domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    Wildcard(WildcardFeature),
    Categorical(CategoricalFeature),
}

impl Feature {
    pub fn name(&self) -> &str {
        match self {
            Feature::Wildcard(f) => f.name(),
            Feature::Categorical(f) => f.name(),
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalFeature> {
        match self {
            Feature::Categorical(f) => Some(f),
            _ => None,
        }
    }
}

impl From<WildcardFeature> for Feature {
    fn from(f: WildcardFeature) -> Self {
        Feature::Wildcard(f)
    }
}

impl From<CategoricalFeature> for Feature {
    fn from(f: CategoricalFeature) -> Self {
        Feature::Categorical(f)
    }
}
