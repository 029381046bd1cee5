//! Implementation of the `#[derive(Record)]` macro.
//!
//! The macro generates three impls for a struct with named fields:
//!
//! - `Record`, exposing every field with its descriptor, resolved once and cached;
//! - `FilterValue`, so the struct can itself be nested in other records;
//! - `Document`, only when `#[filter(collection = "...")]` is present.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Fields, GenericParam, Result, ext::IdentExt, parse_quote,
    spanned::Spanned,
};

use super::attrs::{parse_container_attrs, parse_field_attrs};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(mut input: DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.clone(),
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => return Err(Error::new(input.span(), "Record can only be derived for structs")),
    };

    let container = parse_container_attrs(&input.attrs)?;

    for param in input.generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::docfilter::value::FilterValue));
        }
    }

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut descriptors: Vec<TokenStream> = Vec::new();
    let mut values: Vec<TokenStream> = Vec::new();
    let mut defaults: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let tag = parse_field_attrs(&field.attrs)?.tag;
        let declared = field_name.unraw().to_string();

        descriptors.push(quote! {
            ::docfilter::tag::FieldDescriptor::parse(#declared, #tag)
        });
        values.push(quote! {
            &self.#field_name as &dyn ::docfilter::value::FilterValue
        });
        defaults.push(quote! {
            ::docfilter::value::FilterValue::is_default(&self.#field_name)
        });
    }

    let document_impl = container.collection.as_ref().map(|collection| {
        quote! {
            impl #impl_generics ::docfilter::record::Document for #struct_name #ty_generics #where_clause {
                fn collection_name(&self) -> &str {
                    #collection
                }
            }
        }
    });

    let as_document = container.collection.as_ref().map(|_| {
        quote! {
            fn as_document(&self) -> ::std::option::Option<&dyn ::docfilter::record::Document> {
                ::std::option::Option::Some(self)
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics ::docfilter::record::Record for #struct_name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::docfilter::record::Field<'_>> {
                static DESCRIPTORS: ::std::sync::OnceLock<::std::vec::Vec<::docfilter::tag::FieldDescriptor>> =
                    ::std::sync::OnceLock::new();

                let descriptors = DESCRIPTORS.get_or_init(|| ::std::vec![#(#descriptors),*]);

                descriptors
                    .iter()
                    .zip([#(#values),*])
                    .map(|(descriptor, value)| ::docfilter::record::Field::new(descriptor, value))
                    .collect()
            }

            fn is_default(&self) -> bool {
                true #(&& #defaults)*
            }

            #as_document
        }

        impl #impl_generics ::docfilter::value::FilterValue for #struct_name #ty_generics #where_clause {
            fn kind(&self) -> ::docfilter::value::ValueKind<'_> {
                ::docfilter::value::ValueKind::Object(self)
            }

            fn is_default(&self) -> bool {
                ::docfilter::record::Record::is_default(self)
            }

            fn literal(&self) -> ::docfilter::bson::Bson {
                ::docfilter::bson::Bson::Document(::docfilter::builder::record_literal(self))
            }

            fn shape() -> ::docfilter::value::Shape {
                ::docfilter::value::Shape::Record
            }
        }

        #document_impl
    };

    Ok(expanded)
}
