use proc_macro2::{Span, TokenStream};
use syn::{parse_quote, GenericParam, Generics, Lifetime, LifetimeDef, WhereClause, WherePredicate};

/// Original where clause plus `T: #bound` for every type parameter.
pub fn where_clause_with_bound(generics: &Generics, bound: TokenStream) -> WhereClause {
    let new_predicates = generics
        .type_params()
        .map::<WherePredicate, _>(|param| {
            let param = &param.ident;
            parse_quote!(#param : #bound)
        })
        .collect::<Vec<_>>();

    let mut bounded = generics.clone();
    let clause = bounded.make_where_clause();
    clause.predicates.extend(new_predicates);
    clause.clone()
}

/// Prepends `lifetime` to the generics, outliving every existing lifetime.
pub fn within_lifetime_bound(generics: &Generics, lifetime: &str) -> Generics {
    let mut def = LifetimeDef::new(Lifetime::new(lifetime, Span::call_site()));
    def.bounds
        .extend(generics.lifetimes().map(|param| param.lifetime.clone()));

    let mut generics = generics.clone();
    generics.params.insert(0, GenericParam::Lifetime(def));
    generics
}
