//! Procedural macros for tola-variant
//!
//! ## Derives
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Variant)]` | enum | Closed set of alternatives, one payload each |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Variant)]
//! enum Shape {
//!     Circle(Circle),
//!     Square(Square),
//! }
//!
//! // Visitor: one impl per alternative, checked at build time
//! let area = shape.accept(&mut AreaVisitor);
//!
//! // Or ad hoc handlers
//! let mut area = Shape::overload()
//!     .on_circle(|c| c.area())
//!     .rest(|_| 0.0);
//! area.visit(&shape);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations (common / user)
// =============================================================================

mod common;
mod user;

// =============================================================================
// User-facing Macros (user/)
// =============================================================================

/// Derive a closed variant over an enum whose alternatives each wrap one value.
///
/// Generates:
/// - `Variant` (alternative names, active index)
/// - `Alternative<T>` and `From<T>` per payload type
/// - `Accept<V>` for any `V` that is a `Visitor` of every payload type
/// - `<Enum>Overload`, a handler builder started with `<Enum>::overload()`
///
/// # Usage
/// ```ignore
/// #[derive(Variant)]
/// enum Value {
///     Nothing(Empty),
///     Int(i32),
///     Text(String),
/// }
/// ```
///
/// Unit alternatives, repeated payload types, and generic payloads that can
/// become the same type (`Box<T>` next to `Box<i32>`) are rejected.
#[proc_macro_derive(Variant)]
pub fn derive_variant(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_variant(input).into()
}
