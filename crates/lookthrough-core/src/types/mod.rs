//! Domain types read from the portfolio API.
//!
//! - [`SecurityId`]: identifier of a security reference record
//! - [`SecurityRecord`]: one "signaletique" row with free-form attributes
//! - [`SecurityTable`]: records indexed by id
//! - [`Holding`] / [`TargetPortfolio`]: a model allocation by weight

mod ids;
mod portfolio;
mod security;
mod table;

pub use ids::SecurityId;
pub use portfolio::{Holding, TargetPortfolio};
pub use security::{SecurityRecord, CODE_LABEL, NAME_LABEL};
pub use table::SecurityTable;
