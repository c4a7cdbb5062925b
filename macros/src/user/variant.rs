use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::DeriveInput;

use crate::common::VariantModel;

use super::overload::expand_overload;

/// #[derive(Variant)] expansion.
///
/// Generates, for `enum Shape { Circle(Circle), Square(Square) }`:
/// - `impl Variant for Shape` (names + active index)
/// - `impl Alternative<Circle> for Shape` and `impl From<Circle> for Shape`, per alternative
/// - `impl<V, O> Accept<V> for Shape where V: Visitor<Circle, Output = O> + Visitor<Square, Output = O>`
/// - the `ShapeOverload` handler builder
pub fn expand_derive_variant(input: DeriveInput) -> TokenStream2 {
    let model = match VariantModel::parse(input) {
        Ok(model) => model,
        Err(e) => return e.to_compile_error(),
    };

    let variant_impl = expand_variant(&model);
    let alternatives = expand_alternatives(&model);
    let accept = expand_accept(&model);
    let overload = expand_overload(&model);

    quote! {
        #variant_impl
        #alternatives
        #accept
        #overload
    }
}

fn expand_variant(model: &VariantModel) -> TokenStream2 {
    let self_ty = model.self_ty();
    let (impl_generics, _, where_clause) = model.generics.split_for_impl();

    let names: Vec<String> = model.alts.iter().map(|alt| alt.ident.to_string()).collect();
    let arms = model.alts.iter().map(|alt| {
        let ident = &alt.ident;
        let index = alt.index;
        quote! { Self::#ident(..) => #index, }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics ::tola_variant::Variant for #self_ty #where_clause {
            const ALTERNATIVES: &'static [&'static str] = &[#(#names),*];

            #[inline]
            fn index(&self) -> usize {
                match self {
                    #(#arms)*
                }
            }
        }
    }
}

fn expand_alternatives(model: &VariantModel) -> TokenStream2 {
    let self_ty = model.self_ty();
    let (impl_generics, _, where_clause) = model.generics.split_for_impl();

    let impls = model.alts.iter().map(|alt| {
        let ident = &alt.ident;
        let ty = &alt.ty;
        let index = alt.index;
        let name = ident.to_string();

        quote! {
            #[automatically_derived]
            impl #impl_generics ::tola_variant::Alternative<#ty> for #self_ty #where_clause {
                const INDEX: usize = #index;
                const NAME: &'static str = #name;

                #[inline]
                fn project(&self) -> ::core::option::Option<&#ty> {
                    match self {
                        Self::#ident(value) => ::core::option::Option::Some(value),
                        #[allow(unreachable_patterns)]
                        _ => ::core::option::Option::None,
                    }
                }

                #[inline]
                fn project_mut(&mut self) -> ::core::option::Option<&mut #ty> {
                    match self {
                        Self::#ident(value) => ::core::option::Option::Some(value),
                        #[allow(unreachable_patterns)]
                        _ => ::core::option::Option::None,
                    }
                }

                #[inline]
                fn extract(self) -> ::core::result::Result<#ty, Self> {
                    match self {
                        Self::#ident(value) => ::core::result::Result::Ok(value),
                        #[allow(unreachable_patterns)]
                        other => ::core::result::Result::Err(other),
                    }
                }

                #[inline]
                fn inject(value: #ty) -> Self {
                    Self::#ident(value)
                }
            }

            #[automatically_derived]
            impl #impl_generics ::core::convert::From<#ty> for #self_ty #where_clause {
                #[inline]
                fn from(value: #ty) -> Self {
                    Self::#ident(value)
                }
            }
        }
    });

    quote! { #(#impls)* }
}

fn expand_accept(model: &VariantModel) -> TokenStream2 {
    let self_ty = model.self_ty();
    let generics = model.generics_with(&[quote! { __V: ?Sized }, quote! { __O }]);
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let bounds = model.alts.iter().map(|alt| {
        let ty = &alt.ty;
        quote! { __V: ::tola_variant::Visitor<#ty, Output = __O>, }
    });
    let where_preds = where_clause.map(|w| {
        let preds = w.predicates.iter();
        quote! { #(#preds,)* }
    });

    let arms = model.alts.iter().map(|alt| {
        let ident = &alt.ident;
        let ty = &alt.ty;
        quote! {
            Self::#ident(value) => <__V as ::tola_variant::Visitor<#ty>>::visit(visitor, value),
        }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics ::tola_variant::Accept<__V> for #self_ty
        where
            #where_preds
            #(#bounds)*
        {
            type Output = __O;

            #[inline]
            fn accept(&self, visitor: &mut __V) -> __O {
                match self {
                    #(#arms)*
                }
            }
        }
    }
}
