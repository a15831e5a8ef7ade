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
    let mut field_ty = vec![];
    let mut field_name = vec![];
    let mut skipped_name = vec![];

    for f in &fields.named {
        let opt = BsonetteFieldOptions::from_field(f).map_err(|err| err.write_errors())?;
        let name = opt.name().ok_or_else(|| {
            Error::new_spanned(f, "expected a named field").to_compile_error()
        })?;

        // Present on the wire but left untouched
        if opt.skip {
            skipped_name.push(name);
            continue;
        }

        field.push(f.ident.clone());
        field_ty.push(f.ty.clone());
        field_name.push(name);
    }

    let ident = &input.ident;
    let expecting = ident.to_string();

    let mut where_clause =
        bound::where_clause_with_bound(&input.generics, parse_quote!(__crate::Deserialize<'de>));
    let (impl_generics, ty_generics, orig_where_clause) = input.generics.split_for_impl();
    where_clause
        .predicates
        .push(parse_quote!(#ident #ty_generics: __crate::export::Default));

    let input_generics = bound::within_lifetime_bound(&input.generics, "'de");
    let (impl_de_generics, _, _) = input_generics.split_for_impl();

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications, unused_variables)]
        const _: () = {
            use #crate_path as __crate;

            #[repr(C)]
            struct __Visitor #impl_generics #orig_where_clause {
                __out: __crate::export::Option<#ident #ty_generics>,
            }

            impl #impl_de_generics __crate::de::Visitor<'de> for __Visitor #ty_generics #where_clause {
                fn expecting(&self) -> &'static __crate::export::str {
                    #expecting
                }

                fn document(&mut self, __m: &mut dyn __crate::de::Map<'de>) -> __crate::Result<()> {
                    let __value = self.__out.get_or_insert_with(__crate::export::Default::default);
                    while let __crate::export::Some(__k) = __m.next()? {
                        match __k {
                            #(
                                #field_name => {
                                    let mut __field: __crate::export::Option<#field_ty> = __crate::export::None;
                                    __m.visit(__crate::Deserialize::begin(&mut __field))?;
                                    if let __crate::export::Some(__field) = __field {
                                        __value.#field = __field;
                                    }
                                }
                            )*
                            #( #skipped_name => {} )*
                            _ => return __crate::export::Err(__crate::Error::field_not_found(__k)),
                        }
                    }
                    __crate::export::Ok(())
                }
            }

            impl #impl_de_generics __crate::Deserialize<'de> for #ident #ty_generics #where_clause {
                fn begin(__out: &mut __crate::export::Option<Self>) -> &mut dyn __crate::de::Visitor<'de> {
                    unsafe {
                        &mut *{
                            __out
                            as *mut __crate::export::Option<Self>
                            as *mut __Visitor #ty_generics
                        }
                    }
                }

                fn shape() -> __crate::de::Shape {
                    __crate::de::Shape::Struct
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
    let expecting = ident.to_string();

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            use #crate_path as __crate;

            #[repr(C)]
            struct __Visitor {
                __out: __crate::export::Option<#ident>,
            }

            impl<'de> __crate::de::Visitor<'de> for __Visitor {
                fn expecting(&self) -> &'static __crate::export::str {
                    #expecting
                }

                fn string(&mut self, __s: &'de __crate::export::str) -> __crate::Result<()> {
                    let __value = match __s {
                        #( #variant_name => #ident::#variant, )*
                        __variant => return __crate::export::Err(__crate::Error::unknown_variant(__variant)),
                    };
                    self.__out = __crate::export::Some(__value);
                    __crate::export::Ok(())
                }
            }

            impl<'de> __crate::Deserialize<'de> for #ident {
                fn begin(__out: &mut __crate::export::Option<Self>) -> &mut dyn __crate::de::Visitor<'de> {
                    unsafe {
                        &mut *{
                            __out
                            as *mut __crate::export::Option<Self>
                            as *mut __Visitor
                        }
                    }
                }
            }
        };
    })
}
