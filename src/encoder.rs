//! Keyed registry that collects what each domain contributes to the export.
//!
//! Both maps are keyed by field name and follow last-write-wins semantics:
//! registering a second record under the same name replaces the first. The
//! encoder takes `&mut self` for registration; pipelines that encode several
//! variables in parallel share it behind a `Mutex`.

use crate::domain::Domain;
use crate::error::Result;
use crate::feature::{Feature, WildcardFeature};
use crate::schema::{DataField, DataType, ExportDocument, UnivariateStats};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Accumulates data field declarations and statistics records.
#[derive(Debug, Default)]
pub struct Encoder {
    data_fields: BTreeMap<String, DataField>,
    univariate_stats: BTreeMap<String, UnivariateStats>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a field name to an untyped placeholder feature.
    pub fn wildcard_feature(&self, name: impl Into<String>, data_type: DataType) -> WildcardFeature {
        WildcardFeature::new(name, data_type)
    }

    /// Register a data field declaration, returning the one it replaced.
    pub fn put_data_field(&mut self, field: DataField) -> Option<DataField> {
        self.data_fields.insert(field.name.clone(), field)
    }

    /// Register a statistics record, returning the one it replaced.
    pub fn put_univariate_stats(&mut self, stats: UnivariateStats) -> Option<UnivariateStats> {
        let field = stats.field.clone();
        let previous = self.univariate_stats.insert(field.clone(), stats);
        if previous.is_some() {
            warn!(field = %field, "replacing existing univariate stats");
        } else {
            debug!(field = %field, "registered univariate stats");
        }
        previous
    }

    pub fn data_field(&self, name: &str) -> Option<&DataField> {
        self.data_fields.get(name)
    }

    pub fn univariate_stats(&self, name: &str) -> Option<&UnivariateStats> {
        self.univariate_stats.get(name)
    }

    pub fn num_univariate_stats(&self) -> usize {
        self.univariate_stats.len()
    }

    /// Encode one input variable with `domain`.
    ///
    /// Resolves `name` to a placeholder using the domain's data type and
    /// hands it to [`Domain::encode_features`].
    pub fn encode_domain<D: Domain + ?Sized>(&mut self, name: &str, domain: &D) -> Result<Vec<Feature>> {
        let wildcard = self.wildcard_feature(name, domain.data_type());
        domain.encode_features(vec![Feature::Wildcard(wildcard)], self)
    }

    /// Finish assembly and hand out the document.
    pub fn into_document(self) -> ExportDocument {
        ExportDocument {
            data_fields: self.data_fields,
            univariate_stats: self.univariate_stats,
        }
    }
}
