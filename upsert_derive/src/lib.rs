extern crate proc_macro;

#[macro_use]
mod macros;

mod attrs;
mod descriptor;
mod ext;
mod rename_all;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `upsert::EntityDescriptor`.
///
/// Type attributes: `table` (required), `keys` (comma separated column names)
/// and `rename_all`. Field attributes: `column`, `key` and `skip`.
#[proc_macro_derive(EntityDescriptor, attributes(upsert))]
pub fn entity_descriptor(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    descriptor::generate(&input).into()
}
