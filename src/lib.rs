//! # feature-domain
//!
//! Feature domains for exported model descriptions.
//!
//! A domain decorates one input variable with what was learned about it at
//! training time. The categorical domain turns the raw category values of a
//! variable into a canonical, ordered list of string labels, rebinds the
//! variable's placeholder feature into a categorical feature over those
//! labels and, optionally, packages the training frequencies as a statistics
//! record.
//!
//! ## Core Design Principles
//!
//! - **One canonical label form**: every value, whether it comes from the
//!   category list or from the fitted statistics, is formatted by
//!   [`format_value`], so declared categories and statistics always agree.
//! - **Consumed placeholders**: [`WildcardFeature::into_categorical`] takes the
//!   placeholder by value; it cannot be reused after rebinding.
//! - **Fail, don't repair**: parallel arrays of different length are a
//!   [`DomainError::SizeMismatch`], and nothing is registered with the
//!   [`Encoder`] unless the whole record was built.
//!
//! ## Quick Start
//!
//! ```rust
//! use feature_domain::{CategoricalDomain, Encoder, Value};
//!
//! let domain = CategoricalDomain::new(vec![Value::from(1), Value::from(2), Value::from(3)])
//!     .with_discr_stats(
//!         vec![Value::from(1), Value::from(2), Value::from(3)],
//!         vec![Value::from(10), Value::from(5), Value::from(1)],
//!     );
//!
//! let mut encoder = Encoder::new();
//! let features = encoder.encode_domain("x", &domain).unwrap();
//! assert_eq!(features[0].as_categorical().unwrap().categories(), ["1", "2", "3"]);
//!
//! let document = encoder.into_document();
//! assert!(document.univariate_stats.contains_key("x"));
//! ```
//!
//! ## Module Structure
//!
//! - `value`: raw values and canonical formatting
//! - `feature`: placeholder and categorical features
//! - `domain`: the [`Domain`] trait and [`CategoricalDomain`]
//! - `encoder`: keyed registry of data fields and statistics
//! - `schema`: export document types
//! - `serialization`: params persistence

mod checks;

/// Domain trait and implementations.
pub mod domain;

/// Registry collecting each domain's contribution.
pub mod encoder;

pub mod error;

/// Placeholder and typed feature references.
pub mod feature;

/// Export document types.
pub mod schema;

/// Persistence of fitted domain parameters.
pub mod serialization;

pub mod value;

pub use domain::{CategoricalDomain, CategoricalDomainParams, Domain, DomainConfig};
pub use encoder::Encoder;
pub use error::{DomainError, ErrorKind, Result};
pub use feature::{CategoricalFeature, Feature, WildcardFeature};
pub use schema::{
    Array, ArrayType, Counts, DataField, DataType, DiscrStats, ExportDocument, OpType,
    UnivariateStats,
};
pub use value::{format_value, format_values, Value};
