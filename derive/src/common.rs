//! Attribute parsing shared by both derives

use darling::{FromDeriveInput, FromField, FromVariant};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bsonette))]
pub struct BsonetteOptions {
    pub ident: syn::Ident,
    /// Specify a path to the bsonette crate instance to use when referring to
    /// bsonette APIs from generated code. This is normally only applicable
    /// when invoking re-exported bsonette derives from a public macro in a
    /// different crate.
    #[darling(default, rename = "crate")]
    pub crate_path: Option<syn::Path>,
}

impl BsonetteOptions {
    pub fn crate_path_or_default(&self) -> syn::Path {
        match &self.crate_path {
            Some(path) => path.clone(),
            None => syn::Path::from(syn::Ident::new(
                "bsonette",
                proc_macro2::Span::call_site(),
            )),
        }
    }
}

#[derive(Default, FromField)]
#[darling(default, attributes(bsonette))]
pub struct BsonetteFieldOptions {
    pub ident: Option<syn::Ident>,
    /// Element name on the wire
    pub rename: Option<String>,
    /// Never encoded, keeps its current value when decoding
    pub skip: bool,
}

impl BsonetteFieldOptions {
    /// Element name, `None` for tuple fields
    pub fn name(&self) -> Option<String> {
        match (&self.rename, &self.ident) {
            (Some(rename), _) => Some(rename.clone()),
            (None, Some(ident)) => Some(ident.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(FromVariant)]
#[darling(attributes(bsonette))]
pub struct BsonetteVariantOptions {
    pub ident: syn::Ident,
    #[darling(default)]
    pub rename: Option<String>,
}

impl BsonetteVariantOptions {
    pub fn name(&self) -> String {
        match &self.rename {
            Some(rename) => rename.clone(),
            None => self.ident.to_string(),
        }
    }
}
