use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, FieldsNamed};

pub(crate) trait DeriveInputExt {
    /// Named fields of the struct; anything else is a compile error.
    fn named_fields(&self) -> Result<&FieldsNamed, TokenStream>;

    fn check_no_generics(&self) -> Result<(), TokenStream>;
}

impl DeriveInputExt for DeriveInput {
    fn named_fields(&self) -> Result<&FieldsNamed, TokenStream> {
        match &self.data {
            Data::Struct(s) => match &s.fields {
                Fields::Named(f) => Ok(f),
                _ => Err(Error::new(s.fields.span(), "Only struct with named fields are supported.")
                    .to_compile_error()),
            },
            _ => Err(Error::new(self.span(), "Only struct are supported.").to_compile_error()),
        }
    }

    fn check_no_generics(&self) -> Result<(), TokenStream> {
        if self.generics.params.is_empty() {
            Ok(())
        } else {
            Err(Error::new(self.generics.span(), "Generic entities are not supported.")
                .to_compile_error())
        }
    }
}

pub(crate) trait Errors {
    fn result(&self) -> Result<(), TokenStream>;
}

impl Errors for Vec<TokenStream> {
    fn result(&self) -> Result<(), TokenStream> {
        if self.is_empty() {
            Ok(())
        } else {
            let v = self;
            Err(quote! { #(#v)* })
        }
    }
}
