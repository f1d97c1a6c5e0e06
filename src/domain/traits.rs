//! Core trait for feature domains.
//!
//! A domain decorates one input variable: it knows the variable's valid
//! values (learned upstream) and turns the encoder's placeholder feature into
//! a typed feature, declaring the corresponding data field on the way.

use crate::domain::DomainConfig;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::feature::Feature;
use crate::schema::{DataField, DataType, OpType};

/// Trait for fitted domains ready to be encoded into an export document.
///
/// # Example
/// ```ignore
/// use feature_domain::{CategoricalDomain, Domain, Encoder};
///
/// let domain = CategoricalDomain::new(vec!["red".into(), "green".into()]);
/// let mut encoder = Encoder::new();
/// let features = encoder.encode_domain("color", &domain)?;
/// ```
pub trait Domain {
    /// Shared configuration options.
    fn config(&self) -> &DomainConfig;

    /// Operational type of the features this domain produces.
    fn op_type(&self) -> OpType;

    /// Declared data type of the decorated variable.
    fn data_type(&self) -> DataType;

    /// Rebind the incoming features and register this domain's contribution
    /// with the encoder.
    ///
    /// # Errors
    /// Returns [`DomainError`](crate::DomainError) if:
    /// - the number of incoming features is not what the domain expects
    /// - a value cannot be formatted
    /// - fitted statistics are inconsistent
    fn encode_features(&self, features: Vec<Feature>, encoder: &mut Encoder) -> Result<Vec<Feature>>;

    /// Post-processing shared by all domains.
    ///
    /// Declares a data field for every categorical feature, listing its
    /// categories as the field's valid values.
    fn finish_features(&self, features: Vec<Feature>, encoder: &mut Encoder) -> Result<Vec<Feature>> {
        for feature in &features {
            if let Feature::Categorical(categorical) = feature {
                encoder.put_data_field(DataField {
                    name: categorical.name().to_string(),
                    display_name: self.config().display_name.clone(),
                    op_type: self.op_type(),
                    data_type: categorical.data_type(),
                    values: categorical.categories().to_vec(),
                });
            }
        }
        Ok(features)
    }
}
