use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse_quote, Data, DataEnum, DataStruct, DeriveInput, Error, Fields, FieldsNamed};

use crate::bound;
use crate::common::*;
use crate::DeriveResult;

pub fn derive(input: DeriveInput) -> DeriveResult<TokenStream> {
    match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => derive_struct(&input, fields),
        Data::Enum(enumeration) => derive_enum(&input, enumeration),
        _ => Err(Error::new(
            Span::call_site(),
            "currently only structs with named fields and unit enums are supported",
        )
        .to_compile_error()),
    }
}

fn derive_struct(input: &DeriveInput, fields: &FieldsNamed) -> DeriveResult<TokenStream> {
    let derive_opt = BsonetteOptions::from_derive_input(input).map_err(|err| err.write_errors())?;
    let crate_path = derive_opt.crate_path_or_default();

    let mut field = vec![];
    let mut field_name = vec![];
    for f in &fields.named {
        let opt = BsonetteFieldOptions::from_field(f).map_err(|err| err.write_errors())?;
        if opt.skip {
            continue;
        }
        let name = opt.name().ok_or_else(|| {
            Error::new_spanned(f, "expected a named field").to_compile_error()
        })?;
        field.push(f.ident.clone());
        field_name.push(name);
    }
    let count = field.len();

    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause =
        bound::where_clause_with_bound(&input.generics, parse_quote!(__crate::ser::Serialize));

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            use #crate_path as __crate;

            impl #impl_generics __crate::ser::Serialize for #ident #ty_generics #where_clause {
                fn begin(&self) -> __crate::Result<__crate::ser::Fragment> {
                    let mut __fields = __crate::ser::Fields::with_capacity(#count);
                    #( __fields.field(#field_name, &self.#field); )*
                    __crate::export::Ok(__crate::ser::Fragment::Map(__crate::export::Box::new(__fields)))
                }
            }
        };
    })
}

fn derive_enum(input: &DeriveInput, enumeration: &DataEnum) -> DeriveResult<TokenStream> {
    if input.generics.lt_token.is_some() || input.generics.where_clause.is_some() {
        return Err(
            Error::new(Span::call_site(), "Enums with generics are not supported")
                .to_compile_error(),
        );
    }

    let derive_opt = BsonetteOptions::from_derive_input(input).map_err(|err| err.write_errors())?;
    let crate_path = derive_opt.crate_path_or_default();

    let mut variant = vec![];
    let mut variant_name = vec![];
    for v in &enumeration.variants {
        if !matches!(v.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                v,
                "Invalid variant: only simple enum variants without fields are supported",
            )
            .to_compile_error());
        }
        let opt = BsonetteVariantOptions::from_variant(v).map_err(|err| err.write_errors())?;
        variant_name.push(opt.name());
        variant.push(opt.ident);
    }

    let ident = &input.ident;

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            use #crate_path as __crate;

            impl __crate::ser::Serialize for #ident {
                fn begin(&self) -> __crate::Result<__crate::ser::Fragment> {
                    let __name = match self {
                        #( #ident::#variant => #variant_name, )*
                    };
                    __crate::export::Ok(__crate::ser::Fragment::Str(__crate::export::Cow::Borrowed(__name)))
                }
            }
        };
    })
}
