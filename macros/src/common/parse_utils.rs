//! Common parsing utilities
//!
//! Shared validation helpers for the derive.

use quote::ToTokens;
use syn::Type;

/// Check for duplicate alternative payload types.
///
/// Access by type (`get::<T>()`) needs every payload type to key exactly
/// one alternative. Types are compared as spelled.
pub fn check_duplicates(types: &[Type]) -> syn::Result<()> {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    for ty in types {
        let ty_str = ty.to_token_stream().to_string().replace(' ', "");
        if !seen.insert(ty_str.clone()) {
            return Err(syn::Error::new_spanned(
                ty,
                format!(
                    "duplicate alternative type `{}`\n\
                     \n\
                     Each payload type may appear only once in a closed variant.\n\
                     Access by type would be ambiguous; wrap one of them in a newtype.",
                    ty_str
                ),
            ));
        }
    }
    Ok(())
}
