//! Implementation of the `#[derive(Accessors)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use crate::attrs::FieldAttrs;

pub fn derive_accessors_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_accessors_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_accessors_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Some(&fields.named),
            Fields::Unit => None,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Accessors can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Accessors can only be derived for structs",
            ));
        }
    };

    let mut registrations = Vec::new();
    for field in fields.into_iter().flatten() {
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        let Some(ident) = &field.ident else {
            continue;
        };
        let key = attrs.name.clone().unwrap_or_else(|| ident.to_string());

        if let Some(class) = attrs.class.as_ref().filter(|_| !attrs.set) {
            return Err(syn::Error::new_spanned(class, "`class` requires `set`"));
        }

        if attrs.get {
            registrations.push(quote! {
                table.getter(#key, |source: &Self| &source.#ident);
            });
        }

        if attrs.set {
            registrations.push(match &attrs.class {
                Some(class) => quote! {
                    table.setter_of::<#class, _, _>(#key, |target: &mut Self| &mut target.#ident);
                },
                None => quote! {
                    table.setter(#key, |target: &mut Self| &mut target.#ident);
                },
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::graph_mapper_core::Accessors for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn accessors(table: &mut ::graph_mapper_core::AccessorTable<Self>) {
                #(#registrations)*
            }
        }
    })
}
