mod deserialize;
mod serialize;

use syn::{parse_macro_input, ItemStruct};

#[proc_macro_derive(Deserialize)]
pub fn derive_deserialize(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    deserialize::derive_deserialize_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Serialize)]
pub fn derive_serialize(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    serialize::derive_serialize_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Field names in declaration order; tuple struct fields are numbered.
fn field_names(st: &ItemStruct) -> syn::Result<Vec<syn::Member>> {
    if let syn::Fields::Unit = st.fields {
        return Err(syn::Error::new_spanned(
            &st.ident,
            "unit structs carry no data and cannot be serialized",
        ));
    }
    Ok(st
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(ident) => syn::Member::Named(ident.clone()),
            None => syn::Member::Unnamed(syn::Index::from(i)),
        })
        .collect())
}

fn member_label(member: &syn::Member) -> String {
    match member {
        syn::Member::Named(ident) => ident.to_string(),
        syn::Member::Unnamed(index) => index.index.to_string(),
    }
}
