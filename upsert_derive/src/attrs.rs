use crate::rename_all::RenameAll;
use darling::{util::SpannedValue, FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use syn::Error;

#[derive(Debug, FromField)]
#[darling(attributes(upsert))]
pub(crate) struct FieldAttrs {
    #[darling(default)]
    pub column: Option<String>,

    /// Part of the primary key, in addition to the type `keys`.
    #[darling(default)]
    pub key: SpannedValue<bool>,

    /// Not mapped to a column.
    #[darling(default)]
    pub skip: SpannedValue<bool>,
}

impl FieldAttrs {
    pub fn validate(&self, errors: &mut Vec<TokenStream>) {
        if *self.skip && *self.key {
            errors.push(
                Error::new(self.key.span(), "A skipped field cannot be a key.").to_compile_error(),
            );
        }

        if *self.skip && self.column.is_some() {
            errors.push(
                Error::new(self.skip.span(), "`skip` is incompatible with `column`.")
                    .to_compile_error(),
            );
        }
    }
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(upsert))]
pub(crate) struct TypeAttrs {
    pub table: SpannedValue<String>,

    #[darling(default)]
    pub keys: SpannedValue<String>,

    #[darling(default)]
    pub rename_all: Option<RenameAll>,
}

impl TypeAttrs {
    pub fn keys(&self) -> Vec<&str> {
        self.keys
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn validate(&self, errors: &mut Vec<TokenStream>) {
        if self.table.trim().is_empty() {
            errors.push(Error::new(self.table.span(), "Expected a table name.").to_compile_error());
        }
    }
}
