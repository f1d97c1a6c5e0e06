//! Categorical domain.
//!
//! Rebinds a placeholder feature into a categorical feature over the
//! formatted training categories and packages the fitted frequency
//! statistics for the export document.

use crate::checks::{check_paired, check_size};
use crate::domain::{Domain, DomainConfig};
use crate::encoder::Encoder;
use crate::error::{DomainError, Result};
use crate::feature::Feature;
use crate::schema::{Array, ArrayType, Counts, DataType, DiscrStats, OpType, UnivariateStats};
use crate::serialization::SerializableParams;
use crate::value::{as_integer, as_number, format_values, infer_data_type, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Serializable fitted state of a categorical domain.
///
/// Field names follow the attribute names of the upstream fitted object, so
/// `{"data_": ["a", "b"], "discr_stats_": [["a", "b"], [3, 1]]}` loads as is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDomainParams {
    #[serde(default)]
    pub config: DomainConfig,
    /// Category values in label order.
    #[serde(rename = "data_")]
    pub data: Vec<Value>,
    /// Frequency counts; each entry's zeroth element is used.
    #[serde(rename = "counts_", default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<BTreeMap<String, Vec<Value>>>,
    /// Parallel `(values, counts)` arrays.
    #[serde(rename = "discr_stats_", default, skip_serializing_if = "Option::is_none")]
    pub discr_stats: Option<(Vec<Value>, Vec<Value>)>,
}

/// Domain for a categorical input variable.
///
/// # Example
/// ```ignore
/// use feature_domain::{CategoricalDomain, Encoder, Value};
///
/// let domain = CategoricalDomain::new(vec![Value::from(1), Value::from(2), Value::from(3)])
///     .with_discr_stats(
///         vec![Value::from(1), Value::from(2), Value::from(3)],
///         vec![Value::from(10), Value::from(5), Value::from(1)],
///     );
///
/// let mut encoder = Encoder::new();
/// let features = encoder.encode_domain("x", &domain)?;
/// ```
#[derive(Clone, Debug)]
pub struct CategoricalDomain {
    config: DomainConfig,
    data: Vec<Value>,
    counts: Option<BTreeMap<String, Vec<Value>>>,
    discr_stats: Option<(Vec<Value>, Vec<Value>)>,
}

impl CategoricalDomain {
    /// Create a domain over `data` with default configuration.
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            config: DomainConfig::default(),
            data,
            counts: None,
            discr_stats: None,
        }
    }

    /// Set whether statistics are registered during encoding.
    pub fn with_statistics(mut self, with_statistics: bool) -> Self {
        self.config.with_statistics = with_statistics;
        self
    }

    /// Set the display name of the declared data field.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.config.display_name = Some(display_name.into());
        self
    }

    /// Attach fitted frequency counts.
    pub fn with_counts(mut self, counts: BTreeMap<String, Vec<Value>>) -> Self {
        self.counts = Some(counts);
        self
    }

    /// Attach fitted per-category frequencies.
    ///
    /// Lengths are checked when statistics are built.
    pub fn with_discr_stats(mut self, values: Vec<Value>, counts: Vec<Value>) -> Self {
        self.discr_stats = Some((values, counts));
        self
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn counts(&self) -> Option<&BTreeMap<String, Vec<Value>>> {
        self.counts.as_ref()
    }

    pub fn discr_stats(&self) -> Option<(&[Value], &[Value])> {
        self.discr_stats
            .as_ref()
            .map(|(values, counts)| (values.as_slice(), counts.as_slice()))
    }

    /// Build the statistics record for `field`.
    ///
    /// Missing counts or discretized stats leave the corresponding block out.
    pub fn univariate_stats(&self, field: &str) -> Result<UnivariateStats> {
        let counts = match &self.counts {
            Some(counts) => Some(create_counts(counts)?),
            None => None,
        };
        let discr_stats = match &self.discr_stats {
            Some((values, counts)) => Some(create_discr_stats(values, counts)?),
            None => None,
        };

        Ok(UnivariateStats {
            field: field.to_string(),
            counts,
            discr_stats,
        })
    }

    /// Extract the fitted state as serializable params.
    pub fn extract_params(&self) -> CategoricalDomainParams {
        CategoricalDomainParams {
            config: self.config.clone(),
            data: self.data.clone(),
            counts: self.counts.clone(),
            discr_stats: self.discr_stats.clone(),
        }
    }

    /// Reconstruct a domain from params.
    ///
    /// # Errors
    /// Returns [`DomainError::SizeMismatch`] if the `discr_stats_` arrays
    /// differ in length.
    pub fn from_params(params: CategoricalDomainParams) -> Result<Self> {
        if let Some((values, counts)) = &params.discr_stats {
            check_paired(DISCR_STATS_CONTEXT, values, counts)?;
        }

        Ok(Self {
            config: params.config,
            data: params.data,
            counts: params.counts,
            discr_stats: params.discr_stats,
        })
    }

    /// Load a domain from its JSON params.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: CategoricalDomainParams = serde_json::from_str(json)?;
        Self::from_params(params)
    }

    /// Save the params to a file.
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let bytes = self.extract_params().to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a domain from a params file.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let params = CategoricalDomainParams::from_bytes(&bytes)?;
        Self::from_params(params)
    }
}

impl From<Vec<Value>> for CategoricalDomain {
    fn from(data: Vec<Value>) -> Self {
        Self::new(data)
    }
}

const DISCR_STATS_CONTEXT: &str = "discretized stats values/counts";

impl Domain for CategoricalDomain {
    fn config(&self) -> &DomainConfig {
        &self.config
    }

    fn op_type(&self) -> OpType {
        OpType::Categorical
    }

    fn data_type(&self) -> DataType {
        infer_data_type(&self.data, DataType::String)
    }

    fn encode_features(&self, features: Vec<Feature>, encoder: &mut Encoder) -> Result<Vec<Feature>> {
        check_size("categorical domain features", 1, &features)?;

        let wildcard = match features.into_iter().next() {
            Some(Feature::Wildcard(wildcard)) => wildcard,
            other => {
                return Err(DomainError::type_mismatch(
                    "categorical domain features",
                    format!("expected a wildcard feature, got {:?}", other),
                ))
            }
        };
        let name = wildcard.name().to_string();

        let categories = format_values(&self.data).map_err(|e| e.in_feature(&name))?;
        let feature = wildcard.into_categorical(categories);

        debug!(
            feature = %name,
            n_categories = feature.categories().len(),
            with_statistics = self.config.with_statistics,
            "encoding categorical domain"
        );
        if feature.has_duplicate_categories() {
            warn!(feature = %name, "categorical feature has duplicate categories");
        }

        if self.config.with_statistics {
            let stats = self
                .univariate_stats(feature.name())
                .map_err(|e| e.in_feature(&name))?;
            encoder.put_univariate_stats(stats);
        }

        self.finish_features(vec![Feature::Categorical(feature)], encoder)
    }
}

/// Build the counts block from fitted counts.
///
/// Takes the zeroth element of every entry.
pub fn create_counts(counts: &BTreeMap<String, Vec<Value>>) -> Result<Counts> {
    Ok(Counts::new(extract_column(counts, 0)?))
}

/// Take element `index` of every entry of a map of arrays.
pub fn extract_column(
    map: &BTreeMap<String, Vec<Value>>,
    index: usize,
) -> Result<BTreeMap<String, f64>> {
    map.iter()
        .map(|(key, values)| -> Result<(String, f64)> {
            let value = values.get(index).ok_or_else(|| {
                DomainError::size_mismatch(format!("counts entry `{key}`"), index + 1, values.len())
            })?;
            Ok((key.clone(), as_number(value)?))
        })
        .collect()
}

/// Build the discretized stats block from parallel `values` and `counts`.
///
/// # Errors
/// - [`DomainError::SizeMismatch`] if the sequences differ in length
/// - [`DomainError::TypeMismatch`] if a value cannot be formatted or a count
///   is not an integer
pub fn create_discr_stats(values: &[Value], counts: &[Value]) -> Result<DiscrStats> {
    check_paired(DISCR_STATS_CONTEXT, values, counts)?;

    let labels = format_values(values)?;
    let counts = counts
        .iter()
        .map(|count| as_integer(count).map(|c| c.to_string()))
        .collect::<Result<Vec<String>>>()?;

    DiscrStats::new(
        Array::new(ArrayType::String, labels),
        Array::new(ArrayType::Int, counts),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::feature::WildcardFeature;

    fn values<T: Into<Value> + Clone>(items: &[T]) -> Vec<Value> {
        items.iter().cloned().map(Into::into).collect()
    }

    fn wildcard(name: &str) -> Vec<Feature> {
        vec![Feature::Wildcard(WildcardFeature::new(name, DataType::String))]
    }

    fn categories(features: &[Feature]) -> Vec<String> {
        features[0].as_categorical().unwrap().categories().to_vec()
    }

    #[test]
    fn test_strings_without_statistics() {
        let domain =
            CategoricalDomain::new(values(&["red", "green", "blue"])).with_statistics(false);
        let mut encoder = Encoder::new();

        let features = domain.encode_features(wildcard("color"), &mut encoder).unwrap();

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name(), "color");
        assert_eq!(categories(&features), ["red", "green", "blue"]);
        assert_eq!(encoder.num_univariate_stats(), 0);
    }

    #[test]
    fn test_integers_with_discr_stats() {
        let domain = CategoricalDomain::new(values(&[1, 2, 3]))
            .with_discr_stats(values(&[1, 2, 3]), values(&[10, 5, 1]));
        let mut encoder = Encoder::new();

        let features = domain.encode_features(wildcard("x"), &mut encoder).unwrap();
        assert_eq!(categories(&features), ["1", "2", "3"]);

        let stats = encoder.univariate_stats("x").unwrap();
        let discr = stats.discr_stats.as_ref().unwrap();
        assert_eq!(discr.labels().array_type(), ArrayType::String);
        assert_eq!(discr.labels().values(), ["1", "2", "3"]);
        assert_eq!(discr.counts().array_type(), ArrayType::Int);
        assert_eq!(discr.counts().values(), ["10", "5", "1"]);
        assert!(stats.counts.is_none());
    }

    #[test]
    fn test_discr_stats_length_mismatch() {
        let domain = CategoricalDomain::new(values(&[1, 2]))
            .with_discr_stats(values(&[1, 2]), values(&[10, 5, 1]));
        let mut encoder = Encoder::new();

        let err = domain.encode_features(wildcard("x"), &mut encoder).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
        assert_eq!(err.feature(), Some("x"));
        assert_eq!(encoder.num_univariate_stats(), 0);
        assert!(encoder.data_field("x").is_none());
    }

    #[test]
    fn test_requires_exactly_one_feature() {
        let domain = CategoricalDomain::new(values(&["a"]));
        let mut encoder = Encoder::new();

        let err = domain.encode_features(vec![], &mut encoder).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);

        let mut two = wildcard("a");
        two.extend(wildcard("b"));
        let err = domain.encode_features(two, &mut encoder).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);

        assert_eq!(encoder.num_univariate_stats(), 0);
    }

    #[test]
    fn test_rejects_already_categorical_feature() {
        let domain = CategoricalDomain::new(values(&["a"]));
        let mut encoder = Encoder::new();
        let feature = WildcardFeature::new("f", DataType::String).into_categorical(vec![]);

        let err = domain
            .encode_features(vec![Feature::Categorical(feature)], &mut encoder)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_statistics_gating_ignores_present_stats() {
        let mut counts = BTreeMap::new();
        counts.insert("totalFreq".to_string(), values(&[16]));
        let domain = CategoricalDomain::new(values(&["a", "b"]))
            .with_counts(counts)
            .with_discr_stats(values(&["a", "b"]), values(&[9, 7]))
            .with_statistics(false);
        let mut encoder = Encoder::new();

        domain.encode_features(wildcard("f"), &mut encoder).unwrap();
        assert!(encoder.univariate_stats("f").is_none());
    }

    #[test]
    fn test_labels_match_between_feature_and_stats() {
        // data holds ints, the fitted stats hold integral floats
        let domain = CategoricalDomain::new(values(&[3, 1, 2])).with_discr_stats(
            values(&[1.0, 2.0, 3.0]),
            values(&[4, 4, 2]),
        );
        let mut encoder = Encoder::new();

        let features = domain.encode_features(wildcard("n"), &mut encoder).unwrap();
        let declared = categories(&features);
        let stats = encoder.univariate_stats("n").unwrap();
        for label in stats.discr_stats.as_ref().unwrap().labels().values() {
            assert!(declared.contains(label), "label {label} not declared");
        }
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let domain = CategoricalDomain::new(values(&[1.0, 1.0, 2.5])).with_statistics(false);
        let mut encoder = Encoder::new();

        let features = domain.encode_features(wildcard("d"), &mut encoder).unwrap();
        assert_eq!(categories(&features), ["1", "1", "2.5"]);
        assert!(features[0].as_categorical().unwrap().has_duplicate_categories());
    }

    #[test]
    fn test_null_category_is_type_mismatch() {
        let domain = CategoricalDomain::new(vec![Value::from("a"), Value::Null]);
        let mut encoder = Encoder::new();

        let err = domain.encode_features(wildcard("f"), &mut encoder).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.feature(), Some("f"));
        assert_eq!(encoder.num_univariate_stats(), 0);
    }

    #[test]
    fn test_non_integer_count_is_type_mismatch() {
        let domain = CategoricalDomain::new(values(&["a", "b"]))
            .with_discr_stats(values(&["a", "b"]), values(&[1.0, 2.5]));
        let mut encoder = Encoder::new();

        let err = domain.encode_features(wildcard("f"), &mut encoder).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(encoder.num_univariate_stats(), 0);
    }

    #[test]
    fn test_size_checked_before_count_coercion() {
        let err = create_discr_stats(&values(&["a"]), &values(&[0.5, 0.5])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_counts_block_takes_zeroth_entry() {
        let mut counts = BTreeMap::new();
        counts.insert("totalFreq".to_string(), values(&[16, 99]));
        counts.insert("missingFreq".to_string(), values(&[2.0]));
        let domain = CategoricalDomain::new(values(&["a"])).with_counts(counts);
        let mut encoder = Encoder::new();

        domain.encode_features(wildcard("f"), &mut encoder).unwrap();

        let stats = encoder.univariate_stats("f").unwrap();
        let counts = stats.counts.as_ref().unwrap();
        assert_eq!(counts.total_freq(), Some(16.0));
        assert_eq!(counts.missing_freq(), Some(2.0));
        assert!(stats.discr_stats.is_none());
    }

    #[test]
    fn test_extract_column_empty_entry() {
        let mut counts = BTreeMap::new();
        counts.insert("totalFreq".to_string(), vec![]);

        let err = extract_column(&counts, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_extract_column_non_numeric() {
        let mut counts = BTreeMap::new();
        counts.insert("totalFreq".to_string(), values(&["many"]));

        let err = extract_column(&counts, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_declares_data_field() {
        let domain = CategoricalDomain::new(values(&[2, 1]))
            .with_display_name("Number of doors")
            .with_statistics(false);
        let mut encoder = Encoder::new();

        encoder.encode_domain("doors", &domain).unwrap();

        let field = encoder.data_field("doors").unwrap();
        assert_eq!(field.op_type, OpType::Categorical);
        assert_eq!(field.data_type, DataType::Integer);
        assert_eq!(field.values, ["2", "1"]);
        assert_eq!(field.display_name.as_deref(), Some("Number of doors"));
    }

    #[test]
    fn test_reencoding_overwrites_stats() {
        let mut encoder = Encoder::new();
        let first = CategoricalDomain::new(values(&["a"]))
            .with_discr_stats(values(&["a"]), values(&[1]));
        let second = CategoricalDomain::new(values(&["a"]))
            .with_discr_stats(values(&["a"]), values(&[7]));

        encoder.encode_domain("f", &first).unwrap();
        encoder.encode_domain("f", &second).unwrap();

        let stats = encoder.univariate_stats("f").unwrap();
        assert_eq!(stats.discr_stats.as_ref().unwrap().counts().values(), ["7"]);
        assert_eq!(encoder.num_univariate_stats(), 1);
    }

    #[test]
    fn test_data_type_inference() {
        assert_eq!(
            CategoricalDomain::new(values(&["a", "b"])).data_type(),
            DataType::String
        );
        assert_eq!(
            CategoricalDomain::new(values(&[1.5, 2.0])).data_type(),
            DataType::Double
        );
        assert_eq!(CategoricalDomain::new(vec![]).data_type(), DataType::String);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "config": {"with_statistics": true},
            "data_": ["a", "b"],
            "counts_": {"totalFreq": [4]},
            "discr_stats_": [["a", "b"], [3, 1]]
        }"#;

        let domain = CategoricalDomain::from_json(json).unwrap();
        assert_eq!(domain.data(), values(&["a", "b"]).as_slice());
        assert!(domain.counts().is_some());
        let (stat_values, stat_counts) = domain.discr_stats().unwrap();
        assert_eq!(stat_values.len(), 2);
        assert_eq!(stat_counts, values(&[3, 1]).as_slice());
    }

    #[test]
    fn test_from_json_defaults() {
        let domain = CategoricalDomain::from_json(r#"{"data_": [1, 2]}"#).unwrap();
        assert!(domain.config().with_statistics);
        assert!(domain.counts().is_none());
        assert!(domain.discr_stats().is_none());
    }

    #[test]
    fn test_from_params_rejects_mismatched_discr_stats() {
        let params = CategoricalDomainParams {
            data: values(&[1, 2]),
            discr_stats: Some((values(&[1, 2]), values(&[10, 5, 1]))),
            ..Default::default()
        };
        let err = CategoricalDomain::from_params(params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_extract_params_round_trip() {
        let domain = CategoricalDomain::new(values(&["x", "y"]))
            .with_statistics(false)
            .with_discr_stats(values(&["x", "y"]), values(&[1, 1]));

        let params = domain.extract_params();
        let restored = CategoricalDomain::from_params(params.clone()).unwrap();
        assert_eq!(restored.extract_params(), params);
        assert!(!restored.config().with_statistics);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.json");

        let domain = CategoricalDomain::new(values(&[1, 2, 3]))
            .with_discr_stats(values(&[1, 2, 3]), values(&[10, 5, 1]));
        domain.save_to_file(&path).unwrap();

        let loaded = CategoricalDomain::load_from_file(&path).unwrap();
        assert_eq!(loaded.extract_params(), domain.extract_params());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CategoricalDomain::load_from_file(dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
