//! `<Enum>Overload` handler builder generation.
//!
//! For `enum Shape { Circle(Circle), Square(Square) }` this emits:
//!
//! ```text
//! pub struct ShapeOverload<__H0, __H1, __R> { __h0, __h1, __rest, __variant }
//!
//! Shape::overload()                          -> ShapeOverload<Missing, Missing, NoRest>
//! ShapeOverload<Missing, H1, R>::on_circle(f) -> ShapeOverload<On<F>, H1, R>
//! ShapeOverload<H0, Missing, R>::on_square(f) -> ShapeOverload<H0, On<F>, R>
//! ShapeOverload<H0, H1, NoRest>::rest(f)      -> ShapeOverload<H0, H1, OnRest<F>>
//! ShapeOverload<H0, H1, R>::visit(&shape)     where every Hn: Handler<..>
//! ```

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};

use crate::common::VariantModel;

pub fn expand_overload(model: &VariantModel) -> TokenStream2 {
    let enum_ident = &model.ident;
    let vis = &model.vis;
    let builder = format_ident!("{}Overload", enum_ident);
    let self_ty = model.self_ty();
    let enum_args = model.generic_args();

    let slots: Vec<_> = model.alts.iter().map(|alt| alt.slot_param()).collect();
    let fields: Vec<_> = model.alts.iter().map(|alt| alt.slot_field()).collect();

    let missing = quote! { ::tola_variant::variant::overload::Missing };
    let no_rest = quote! { ::tola_variant::variant::overload::NoRest };

    // Struct definition: enum generics + slots + rest.
    let mut struct_extra: Vec<TokenStream2> = slots.iter().map(|s| quote! { #s }).collect();
    struct_extra.push(quote! { __R });
    let struct_generics = model.generics_with(&struct_extra);
    let (struct_params, _, struct_where) = struct_generics.split_for_impl();

    let doc = format!(
        "Handler builder for [`{enum_ident}`], one slot per alternative. \
         Start with [`{enum_ident}::overload`]."
    );

    let definition = quote! {
        #[doc = #doc]
        #[must_use]
        #vis struct #builder #struct_params #struct_where {
            #(#fields: #slots,)*
            __rest: __R,
            __variant: ::core::marker::PhantomData<fn(&#self_ty)>,
        }
    };

    // Entry point on the enum itself.
    let (impl_generics, _, where_clause) = model.generics.split_for_impl();
    let all_missing = slots.iter().map(|_| missing.clone());
    let init_fields = fields.iter().map(|f| quote! { #f: #missing, });
    let entry = quote! {
        #[automatically_derived]
        impl #impl_generics #self_ty #where_clause {
            /// Start a handler set with no alternative covered.
            #vis fn overload() -> #builder<#(#enum_args,)* #(#all_missing,)* #no_rest> {
                #builder {
                    #(#init_fields)*
                    __rest: #no_rest,
                    __variant: ::core::marker::PhantomData,
                }
            }
        }
    };

    // on_<alternative>: only while that slot is Missing.
    let handlers = model.alts.iter().map(|alt| {
        let method = alt.handler_ident();
        let ty = &alt.ty;
        let k = alt.index;

        let mut extra: Vec<TokenStream2> = slots
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .map(|(_, s)| quote! { #s })
            .collect();
        extra.push(quote! { __R });
        let generics = model.generics_with(&extra);
        let (impl_generics, _, where_clause) = generics.split_for_impl();

        let before = slots.iter().enumerate().map(|(i, s)| {
            if i == k { missing.clone() } else { quote! { #s } }
        });
        let after = slots.iter().enumerate().map(|(i, s)| {
            if i == k { quote! { ::tola_variant::variant::overload::On<__F> } } else { quote! { #s } }
        });
        let moved = fields.iter().enumerate().map(|(i, f)| {
            if i == k {
                quote! { #f: ::tola_variant::variant::overload::On(handler), }
            } else {
                quote! { #f: self.#f, }
            }
        });
        let doc = format!("Handle the `{}` alternative.", alt.ident);

        quote! {
            #[automatically_derived]
            impl #impl_generics #builder<#(#enum_args,)* #(#before,)* __R> #where_clause {
                #[doc = #doc]
                #vis fn #method<__F, __O>(self, handler: __F) -> #builder<#(#enum_args,)* #(#after,)* __R>
                where
                    __F: ::core::ops::FnMut(&#ty) -> __O,
                {
                    #builder {
                        #(#moved)*
                        __rest: self.__rest,
                        __variant: ::core::marker::PhantomData,
                    }
                }
            }
        }
    });

    // rest: only while no catch-all is installed.
    let slot_params: Vec<TokenStream2> = slots.iter().map(|s| quote! { #s }).collect();
    let rest_generics = model.generics_with(&slot_params);
    let (rest_impl, _, rest_where) = rest_generics.split_for_impl();
    let rest = quote! {
        #[automatically_derived]
        impl #rest_impl #builder<#(#enum_args,)* #(#slots,)* #no_rest> #rest_where {
            /// Handle every alternative without a specific handler.
            #vis fn rest<__F, __O>(self, handler: __F) -> #builder<#(#enum_args,)* #(#slots,)* ::tola_variant::variant::overload::OnRest<__F>>
            where
                __F: ::core::ops::FnMut(&#self_ty) -> __O,
            {
                #builder {
                    #(#fields: self.#fields,)*
                    __rest: ::tola_variant::variant::overload::OnRest(handler),
                    __variant: ::core::marker::PhantomData,
                }
            }
        }
    };

    // visit: every slot must resolve to a handler.
    let visit_bounds = model.alts.iter().map(|alt| {
        let slot = alt.slot_param();
        let ty = &alt.ty;
        quote! { #slot: ::tola_variant::variant::overload::Handler<#ty, #self_ty, __R, __O>, }
    });
    let visit_arms = model.alts.iter().map(|alt| {
        let ident = &alt.ident;
        let field = alt.slot_field();
        let ty = &alt.ty;
        let slot = alt.slot_param();
        quote! {
            #enum_ident::#ident(alternative) => <#slot as ::tola_variant::variant::overload::Handler<#ty, #self_ty, __R, __O>>::handle(
                &mut self.#field,
                alternative,
                value,
                &mut self.__rest,
            ),
        }
    });
    let visit = quote! {
        #[automatically_derived]
        impl #struct_params #builder<#(#enum_args,)* #(#slots,)* __R> #struct_where {
            /// Run the handler of the active alternative of `value`.
            #vis fn visit<__O>(&mut self, value: &#self_ty) -> __O
            where
                #(#visit_bounds)*
            {
                match value {
                    #(#visit_arms)*
                }
            }
        }
    };

    quote! {
        #definition
        #entry
        #(#handlers)*
        #rest
        #visit
    }
}
