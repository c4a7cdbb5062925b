use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{
    Data, DeriveInput, Fields, GenericArgument, GenericParam, Generics, Ident, PathArguments, Type,
    Visibility,
};

use super::check_duplicates;

/// One alternative of a closed variant: `Name(Payload)`.
pub struct AltModel {
    pub ident: Ident,
    pub ty: Type,
    pub index: usize,
}

impl AltModel {
    /// Builder method name: `HttpRequest` -> `on_http_request`.
    pub fn handler_ident(&self) -> Ident {
        format_ident!("on_{}", to_snake_case(&self.ident.to_string()))
    }

    /// Builder slot type parameter: `__H0`, `__H1`, ...
    pub fn slot_param(&self) -> Ident {
        format_ident!("__H{}", self.index)
    }

    /// Builder slot field: `__h0`, `__h1`, ...
    pub fn slot_field(&self) -> Ident {
        format_ident!("__h{}", self.index)
    }
}

/// Enum deriving `Variant`, validated.
pub struct VariantModel {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub alts: Vec<AltModel>,
}

impl VariantModel {
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        let data = match input.data {
            Data::Enum(data) => data,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Variant can only be derived for enums",
                ));
            }
        };

        if data.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "a closed variant needs at least one alternative",
            ));
        }

        let mut alts = Vec::with_capacity(data.variants.len());
        for (index, variant) in data.variants.into_iter().enumerate() {
            let ty = match variant.fields {
                Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                    fields.unnamed.into_iter().next().map(|field| field.ty)
                }
                Fields::Unit => {
                    return Err(syn::Error::new_spanned(
                        &variant.ident,
                        format!(
                            "alternative `{}` holds no value\n\
                             \n\
                             Wrap the empty alternative as `{}(tola_variant::Empty)`.",
                            variant.ident, variant.ident
                        ),
                    ));
                }
                _ => None,
            };
            let Some(ty) = ty else {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    format!(
                        "alternative `{}` must wrap exactly one unnamed value\n\
                         \n\
                         Group several values into a tuple or struct: `{}((A, B))`.",
                        variant.ident, variant.ident
                    ),
                ));
            };
            alts.push(AltModel { ident: variant.ident, ty, index });
        }

        let types: Vec<Type> = alts.iter().map(|alt| alt.ty.clone()).collect();
        check_duplicates(&types)?;
        check_overlapping_params(&input.generics, &types)?;

        Ok(VariantModel {
            ident: input.ident,
            vis: input.vis,
            generics: input.generics,
            alts,
        })
    }

    /// `Shape<'a, T>` as a type.
    pub fn self_ty(&self) -> TokenStream {
        let ident = &self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote! { #ident #ty_generics }
    }

    /// Generic arguments of the enum without angle brackets: `'a, T, N`.
    pub fn generic_args(&self) -> Vec<TokenStream> {
        self.generics
            .params
            .iter()
            .map(|param| match param {
                GenericParam::Lifetime(lt) => lt.lifetime.to_token_stream(),
                GenericParam::Type(ty) => ty.ident.to_token_stream(),
                GenericParam::Const(c) => c.ident.to_token_stream(),
            })
            .collect()
    }

    /// Enum generics extended with extra type parameters.
    pub fn generics_with(&self, extra: &[TokenStream]) -> Generics {
        let mut generics = self.generics.clone();
        for param in extra {
            generics.params.push(syn::parse_quote!(#param));
        }
        generics
    }
}

/// Two payloads that become the same type for some choice of the enum's
/// type parameters would give overlapping `Alternative` impls.
///
/// Type parameters match any type and lifetimes match each other; paths
/// are otherwise compared as spelled. Two spellings of one concrete type
/// (`i32` and `core::primitive::i32`, or a type alias) are not detected
/// here and surface as the compiler's conflicting-implementations error.
fn check_overlapping_params(generics: &Generics, types: &[Type]) -> syn::Result<()> {
    let params: Vec<&Ident> = generics.type_params().map(|param| &param.ident).collect();
    if params.is_empty() {
        return Ok(());
    }

    for (i, a) in types.iter().enumerate() {
        for b in &types[i + 1..] {
            if may_unify(a, b, &params) {
                return Err(syn::Error::new_spanned(
                    b,
                    format!(
                        "alternative payloads `{}` and `{}` can be the same type\n\
                         \n\
                         Some choice of the enum's type parameters makes them equal, \
                         so access by type would be ambiguous. Give them distinct \
                         outer types, e.g. `Box<T>` and `Vec<T>`, or use a newtype.",
                        a.to_token_stream().to_string().replace(' ', ""),
                        b.to_token_stream().to_string().replace(' ', ""),
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Whether `a` and `b` can name the same type once type parameters are
/// substituted.
fn may_unify(a: &Type, b: &Type, params: &[&Ident]) -> bool {
    if is_open(a, params) || is_open(b, params) {
        return true;
    }
    match (a, b) {
        (Type::Paren(a), _) => may_unify(&a.elem, b, params),
        (_, Type::Paren(b)) => may_unify(a, &b.elem, params),
        (Type::Group(a), _) => may_unify(&a.elem, b, params),
        (_, Type::Group(b)) => may_unify(a, &b.elem, params),
        (Type::Path(a), Type::Path(b)) => {
            a.path.segments.len() == b.path.segments.len()
                && a.path.segments.iter().zip(&b.path.segments).all(|(x, y)| {
                    x.ident == y.ident && args_unify(&x.arguments, &y.arguments, params)
                })
        }
        (Type::Reference(a), Type::Reference(b)) => {
            a.mutability.is_some() == b.mutability.is_some()
                && may_unify(&a.elem, &b.elem, params)
        }
        (Type::Ptr(a), Type::Ptr(b)) => {
            a.mutability.is_some() == b.mutability.is_some()
                && may_unify(&a.elem, &b.elem, params)
        }
        (Type::Tuple(a), Type::Tuple(b)) => {
            a.elems.len() == b.elems.len()
                && a.elems.iter().zip(&b.elems).all(|(x, y)| may_unify(x, y, params))
        }
        // Lengths may be const parameters, so only the element decides.
        (Type::Array(a), Type::Array(b)) => may_unify(&a.elem, &b.elem, params),
        (Type::Slice(a), Type::Slice(b)) => may_unify(&a.elem, &b.elem, params),
        _ => same_tokens(a, b),
    }
}

/// A bare parameter `T`, a projection `T::Item`, or a qualified `<X as Tr>::Y`.
fn is_open(ty: &Type, params: &[&Ident]) -> bool {
    let Type::Path(path) = ty else { return false };
    if path.qself.is_some() {
        return true;
    }
    path.path.leading_colon.is_none()
        && path
            .path
            .segments
            .first()
            .is_some_and(|first| first.arguments.is_none() && params.contains(&&first.ident))
}

fn args_unify(a: &PathArguments, b: &PathArguments, params: &[&Ident]) -> bool {
    match (a, b) {
        (PathArguments::None, PathArguments::None) => true,
        (PathArguments::AngleBracketed(a), PathArguments::AngleBracketed(b)) => {
            a.args.len() == b.args.len()
                && a.args.iter().zip(&b.args).all(|(x, y)| match (x, y) {
                    (GenericArgument::Type(x), GenericArgument::Type(y)) => {
                        may_unify(x, y, params)
                    }
                    (GenericArgument::Lifetime(_), GenericArgument::Lifetime(_)) => true,
                    (GenericArgument::Const(_), GenericArgument::Const(_)) => true,
                    _ => same_tokens(x, y),
                })
        }
        _ => same_tokens(a, b),
    }
}

fn same_tokens<T: ToTokens>(a: &T, b: &T) -> bool {
    a.to_token_stream().to_string() == b.to_token_stream().to_string()
}

/// `Circle` -> `circle`, `HttpRequest` -> `http_request`,
/// `HTTPRequest` -> `http_request`, `r#Type` -> `type`.
///
/// A run of capitals is one word; its last capital starts the next word
/// when a lowercase letter follows.
fn to_snake_case(s: &str) -> String {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (!prev.is_uppercase() || next_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("Circle"), "circle");
        assert_eq!(to_snake_case("HttpRequest"), "http_request");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("IOError"), "io_error");
        assert_eq!(to_snake_case("Utf8"), "utf8");
        assert_eq!(to_snake_case("ID"), "id");
        assert_eq!(to_snake_case("Snake_Case"), "snake_case");
        assert_eq!(to_snake_case("r#Type"), "type");
    }

    #[test]
    fn test_raw_ident_handler() {
        let input: DeriveInput = syn::parse_quote! { enum E { r#Type(u8), HTTPRequest(u16) } };
        let model = VariantModel::parse(input).unwrap();
        assert_eq!(model.alts[0].handler_ident().to_string(), "on_type");
        assert_eq!(model.alts[1].handler_ident().to_string(), "on_http_request");
    }

    #[test]
    fn test_rejects_overlapping_generic_payloads() {
        let reject: [DeriveInput; 5] = [
            syn::parse_quote! { enum E<T> { A(Box<T>), B(Box<i32>) } },
            syn::parse_quote! { enum E<T> { A(Vec<Box<T>>), B(Vec<Box<u8>>) } },
            syn::parse_quote! { enum E<T, U> { A((T, u8)), B((i32, U)) } },
            syn::parse_quote! { enum E<'a, T> { A(&'a T), B(&'a u8) } },
            syn::parse_quote! { enum E<T: Iterator> { A(T::Item), B(u8) } },
        ];
        for input in reject {
            assert!(VariantModel::parse(input).is_err());
        }

        let accept: [DeriveInput; 4] = [
            syn::parse_quote! { enum E<T> { A(Box<T>), B(Vec<T>) } },
            syn::parse_quote! { enum E<T> { A(Box<T>), B(Option<Box<T>>) } },
            syn::parse_quote! { enum E<'a, T> { A(&'a T), B(&'a mut T) } },
            syn::parse_quote! { enum E<T> { A(Box<T>) } },
        ];
        for input in accept {
            assert!(VariantModel::parse(input).is_ok());
        }
    }

    #[test]
    fn test_overlap_message_names_both_payloads() {
        let input: DeriveInput = syn::parse_quote! { enum E<T> { A(Box<T>), B(Box<i32>) } };
        let message = VariantModel::parse(input).err().unwrap().to_string();
        assert!(message.contains("`Box<T>` and `Box<i32>`"));
    }

    #[test]
    fn test_rejects_unit_and_duplicates() {
        let unit: DeriveInput = syn::parse_quote! { enum E { A(i32), B } };
        assert!(VariantModel::parse(unit).is_err());

        let duplicate: DeriveInput = syn::parse_quote! { enum E { A(i32), B(i32) } };
        assert!(VariantModel::parse(duplicate).is_err());

        let named: DeriveInput = syn::parse_quote! { enum E { A { x: i32 } } };
        assert!(VariantModel::parse(named).is_err());

        let bare: DeriveInput = syn::parse_quote! { enum E<T> { A(T), B(i32) } };
        assert!(VariantModel::parse(bare).is_err());

        let wrapped: DeriveInput = syn::parse_quote! { enum E<T> { A(Box<T>), B(Vec<T>) } };
        assert!(VariantModel::parse(wrapped).is_ok());

        let ok: DeriveInput = syn::parse_quote! { enum E { A(i32), B(Vec<i32>) } };
        let model = VariantModel::parse(ok).unwrap();
        assert_eq!(model.alts.len(), 2);
        assert_eq!(model.alts[1].handler_ident().to_string(), "on_b");
    }
}
