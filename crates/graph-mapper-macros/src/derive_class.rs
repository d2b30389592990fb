//! Implementation of the `#[derive(Class)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, parse_macro_input};

use crate::attrs::{FieldAttrs, KindAttr, TypeAttrs};

pub fn derive_class_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_class_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_class_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let class_name = attrs.name.clone().unwrap_or_else(|| name.to_string());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let kind = match attrs.kind {
        None => quote! { ::graph_mapper_core::ClassKind::Concrete },
        Some(KindAttr::Abstract) => quote! { ::graph_mapper_core::ClassKind::Abstract },
        Some(KindAttr::Union) => quote! { ::graph_mapper_core::ClassKind::Interface { methods: &[] } },
        Some(KindAttr::Interface) => {
            let methods = &attrs.methods;
            quote! { ::graph_mapper_core::ClassKind::Interface { methods: &[#(#methods),*] } }
        }
    };

    let base = generate_base(input)?;

    Ok(quote! {
        impl #impl_generics ::graph_mapper_core::Class for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #class_name
            }

            fn kind() -> ::graph_mapper_core::ClassKind {
                #kind
            }

            #base
        }
    })
}

/// Generate `base`/`base_mut` for the field marked `#[graph_mapper(base)]`.
fn generate_base(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Ok(TokenStream2::new());
    };

    let mut base = None;
    for (index, field) in data.fields.iter().enumerate() {
        if !FieldAttrs::from_attrs(&field.attrs)?.base {
            continue;
        }
        if base.is_some() {
            let at = field.ident.as_ref().map_or_else(|| field.ty.span(), |ident| ident.span());
            return Err(syn::Error::new(at, "only one field may be marked `base`"));
        }
        let member = match &field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = syn::Index::from(index);
                quote! { #index }
            }
        };
        base = Some(member);
    }

    let Some(member) = base else {
        return Ok(TokenStream2::new());
    };

    Ok(quote! {
        fn base(&self) -> ::core::option::Option<&dyn ::graph_mapper_core::Object> {
            ::core::option::Option::Some(&self.#member)
        }

        fn base_mut(&mut self) -> ::core::option::Option<&mut dyn ::graph_mapper_core::Object> {
            ::core::option::Option::Some(&mut self.#member)
        }
    })
}
