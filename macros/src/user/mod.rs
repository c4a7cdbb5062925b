//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Variant)]` | on enum | Closed variant + visitor plumbing + handler builder |

mod overload;
mod variant;

pub use variant::expand_derive_variant;
