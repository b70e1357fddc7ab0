use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, ItemStruct, LitStr};

use crate::{field_names, member_label};

pub fn derive_serialize_impl(st: ItemStruct) -> syn::Result<TokenStream> {
    let mut stmts = vec![];
    for (field, member) in st.fields.iter().zip(field_names(&st)?) {
        let error = LitStr::new(
            &format!("cannot serialize field {}::{}", st.ident, member_label(&member)),
            field.span(),
        );
        stmts.push(quote! {
            ::folio_core::binary::ResultContextExt::context(
                ::folio_core::binary::Serialize::serialize(&self.#member, serializer),
                #error,
            )?;
        });
    }

    let type_name = &st.ident;
    let (impl_generics, type_generics, where_clause) = st.generics.split_for_impl();
    let stmts = TokenStream::from_iter(stmts);

    Ok(quote! {
        impl #impl_generics ::folio_core::binary::Serialize for #type_name #type_generics #where_clause {
            fn serialize(&self, serializer: &mut ::folio_core::binary::Serializer<impl ::std::io::Write>) -> ::std::result::Result<(), ::folio_core::binary::Error> {
                #stmts
                ::std::result::Result::Ok(())
            }
        }
    })
}
