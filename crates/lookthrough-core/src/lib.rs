//! # Lookthrough Core
//!
//! Core types and text/number handling shared by the Lookthrough crates.
//!
//! Security reference data ("signaletique") arrives from an external API with
//! free-form attribute labels and loosely formatted values. This crate turns
//! that data into something that can be queried reliably:
//!
//! - **Label normalization**: accent, case and punctuation insensitive keys
//! - **Numeric coercion**: `"12,5%"`, `"7.25"`, `40` and `null` all become `f64`
//! - **Field lookup**: fetch a numeric attribute by any spelling of its label
//! - **Types**: `SecurityRecord`, `SecurityTable`, `Holding`, `TargetPortfolio`
//!
//! ## Design Philosophy
//!
//! - **Total functions**: normalization, coercion and lookup never fail
//! - **Read-only**: records are owned by the API; nothing here mutates them
//! - **Wire-compatible**: types deserialize directly from the API payloads
//!
//! ## Example
//!
//! ```rust
//! use lookthrough_core::prelude::*;
//! use serde_json::json;
//!
//! let record = SecurityRecord::new(1, "ACWI")
//!     .with_attribute("Qualité crédit", json!("12,5%"));
//!
//! assert_eq!(normalize_label("Qualite Credit"), "qualite credit");
//! assert_eq!(record.field("QUALITE-CREDIT"), 12.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod coerce;
pub mod error;
pub mod label;
pub mod lookup;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::coerce::{coerce_number, coerce_str};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::label::{normalize_label, LabelKey};
    pub use crate::lookup::{
        field_lookup, field_text, Attributes, CollisionPolicy, NormalizedAttributes,
    };
    pub use crate::types::{Holding, SecurityId, SecurityRecord, SecurityTable, TargetPortfolio};
}

// Re-export commonly used items at crate root
pub use coerce::{coerce_number, coerce_str};
pub use error::{CoreError, CoreResult};
pub use label::{normalize_label, LabelKey};
pub use lookup::{field_lookup, field_text, Attributes, CollisionPolicy, NormalizedAttributes};
pub use types::{Holding, SecurityId, SecurityRecord, SecurityTable, TargetPortfolio};
