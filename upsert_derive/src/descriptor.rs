use crate::{
    attrs::{FieldAttrs, TypeAttrs},
    ext::{DeriveInputExt, Errors},
    rename_all::RenameAll,
};
use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, DeriveInput, Error, LitStr};

pub(crate) fn generate(input: &DeriveInput) -> TokenStream {
    let ident = &input.ident;
    let attrs = try_ts!(TypeAttrs::from_derive_input(input).map_err(|e| e.write_errors()));

    try_ts!(input.check_no_generics());

    let mut errors = Vec::new();
    let mut columns = Vec::new();
    let mut names = Vec::new();
    let keys = attrs.keys();

    attrs.validate(&mut errors);

    for field in &try_ts!(input.named_fields()).named {
        let field_attrs = continue_ts!(
            FieldAttrs::from_field(field).map_err(|e| e.write_errors()),
            errors
        );

        field_attrs.validate(&mut errors);

        if *field_attrs.skip {
            continue;
        }

        let column = continue_ts!(
            RenameAll::column(attrs.rename_all, &field_attrs.column, field),
            errors
        );

        let key = *field_attrs.key || keys.contains(&column.as_str());
        let name = LitStr::new(&column, field.span());
        let field_ident = &field.ident;

        if names.contains(&column) {
            errors.push(
                Error::new(field.span(), format!("Column `{column}` is mapped twice."))
                    .to_compile_error(),
            );
        }

        columns.push(quote! {
            upsert::Column {
                name: #name,
                key: #key,
                read: |e| upsert::ToValue::to_value(&e.#field_ident),
            }
        });

        names.push(column);
    }

    for key in &keys {
        if !names.iter().any(|n| n == key) {
            errors.push(
                Error::new(attrs.keys.span(), format!("Key `{key}` is not a mapped column."))
                    .to_compile_error(),
            );
        }
    }

    try_ts!(errors.result());

    let table = LitStr::new(&attrs.table, attrs.table.span());

    quote! {
        const _: () = {
            extern crate upsert;

            #[automatically_derived]
            impl upsert::EntityDescriptor for #ident {
                const TABLE: &'static str = #table;
                const COLUMNS: &'static [upsert::Column<Self>] = &[#(#columns,)*];
            }
        };
    }
}
