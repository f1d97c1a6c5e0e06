//! Feature domains.
//!
//! # Available Domains
//!
//! ## CategoricalDomain
//! Declares a variable as categorical over the labels seen during training
//! and, optionally, attaches per-category frequency statistics.
//!
//! ```ignore
//! // data_ = [1, 2, 3], discr_stats_ = ([1, 2, 3], [10, 5, 1])
//! // -> categories ["1", "2", "3"]
//! // -> discr stats: labels ["1", "2", "3"], counts [10, 5, 1]
//! ```

mod categorical;
mod traits;

pub use categorical::{
    create_counts, create_discr_stats, extract_column, CategoricalDomain, CategoricalDomainParams,
};
pub use traits::Domain;

use serde::{Deserialize, Serialize};

/// Configuration shared by all domains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// If true, statistics records are produced during encoding.
    pub with_statistics: bool,
    /// Human readable name attached to the declared data field.
    pub display_name: Option<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            with_statistics: true,
            display_name: None,
        }
    }
}
