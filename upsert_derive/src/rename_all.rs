use darling::FromMeta;
use inflector::Inflector;
use proc_macro2::TokenStream;
use syn::{spanned::Spanned, Field};

#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, Eq, FromMeta, PartialEq)]
pub(crate) enum RenameAll {
    #[darling(rename = "camelCase")]
    CamelCase,

    #[darling(rename = "PascalCase")]
    PascalCase,

    #[darling(rename = "snake_case")]
    SnakeCase,
}

impl RenameAll {
    /// Column of the field: the explicit `column` attribute, otherwise the
    /// field name renamed by the type `rename_all`.
    pub fn column(
        this: Option<Self>,
        column: &Option<String>,
        field: &Field,
    ) -> Result<String, TokenStream> {
        if let Some(c) = column.as_ref().filter(|c| !c.is_empty()) {
            return Ok(c.clone());
        }

        let s = match field.ident.as_ref() {
            Some(v) => v.to_string(),
            None => return Err(syn::Error::new(field.span(), "Ident expected.").to_compile_error()),
        };

        // raw identifiers like `r#type` map to `type`.
        let s = s.strip_prefix("r#").map(str::to_string).unwrap_or(s);

        Ok(match this {
            Some(r) => r.rename(&s),
            None => s,
        })
    }

    fn rename(&self, s: &str) -> String {
        match self {
            Self::CamelCase => s.to_camel_case(),
            Self::PascalCase => s.to_pascal_case(),
            Self::SnakeCase => s.to_snake_case(),
        }
    }
}
