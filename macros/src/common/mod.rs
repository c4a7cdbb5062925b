// Common utilities shared by the derive expansions
//
// This module contains:
// - parse_utils: Validation helpers
// - variant_model: Parsed and validated enum model

mod parse_utils;
pub mod variant_model;

pub use parse_utils::*;
pub use variant_model::*;
