use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, ItemStruct, LitStr};

use crate::{field_names, member_label};

pub fn derive_deserialize_impl(st: ItemStruct) -> syn::Result<TokenStream> {
    let mut variables = vec![];
    let mut constructor_fields = vec![];
    for (i, (field, member)) in st.fields.iter().zip(field_names(&st)?).enumerate() {
        let field_type = &field.ty;
        let variable: Ident = format_ident!("__field_{}", i);
        let error = LitStr::new(
            &format!("cannot deserialize field {}::{}", st.ident, member_label(&member)),
            field.span(),
        );
        variables.push(quote! {
            let #variable: #field_type = ::folio_core::binary::ResultContextExt::context(
                ::folio_core::binary::Deserialize::deserialize(deserializer),
                #error,
            )?;
        });
        constructor_fields.push(quote! { #member: #variable, })
    }

    let type_name = &st.ident;
    let (impl_generics, type_generics, where_clause) = st.generics.split_for_impl();
    let variables = TokenStream::from_iter(variables);
    let constructor_fields = TokenStream::from_iter(constructor_fields);

    Ok(quote! {
        impl #impl_generics ::folio_core::binary::Deserialize for #type_name #type_generics #where_clause {
            fn deserialize(deserializer: &mut ::folio_core::binary::Deserializer<impl ::std::io::Read>) -> ::std::result::Result<Self, ::folio_core::binary::Error> {
                #variables
                ::std::result::Result::Ok(Self {
                    #constructor_fields
                })
            }
        }
    })
}
