use syn::{GenericArgument, PathArguments};

/// Shape of a declared field type, reduced to the forms the generator
/// understands plus a catch-all for everything else.
///
/// The qualifier of a [`TypeExpr::Qualified`] is kept as a full expression
/// so that paths of three or more segments lower to a nested qualifier,
/// which resolution then rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Plain identifier, e.g. `i64`, `String`.
    Ident(String),
    /// Namespace-qualified reference, e.g. `chrono::NaiveDateTime`.
    Qualified {
        qualifier: Box<TypeExpr>,
        member: String,
    },
    /// Sequence of the inner type, spelled `Vec<T>` in source.
    Array(Box<TypeExpr>),
    /// Nullable indirection to the inner type, spelled `Option<T>` in source.
    Pointer(Box<TypeExpr>),
    /// Any shape the generator does not support.
    Other,
}

impl TypeExpr {
    /// Lowers a parsed type to its [`TypeExpr`] shape. Total: unsupported
    /// syn shapes become [`TypeExpr::Other`] rather than failing.
    pub fn from_type(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Path(p) if p.qself.is_none() => Self::from_path(&p.path),
            _ => TypeExpr::Other,
        }
    }

    fn from_path(path: &syn::Path) -> Self {
        let segments: Vec<_> = path.segments.iter().collect();
        if segments.is_empty() {
            return TypeExpr::Other;
        }
        if segments.len() > 1 {
            // Multi-segment path. Fold the leading segments into the
            // qualifier chain; generic arguments anywhere disqualify it.
            if segments.iter().any(|s| !s.arguments.is_none()) {
                return TypeExpr::Other;
            }
            let mut expr = TypeExpr::Ident(segments[0].ident.to_string());
            for segment in &segments[1..] {
                expr = TypeExpr::Qualified {
                    qualifier: Box::new(expr),
                    member: segment.ident.to_string(),
                };
            }
            return expr;
        }
        let segment = segments[0];

        match &segment.arguments {
            PathArguments::None => TypeExpr::Ident(segment.ident.to_string()),
            PathArguments::AngleBracketed(args) => {
                if args.args.len() != 1 {
                    return TypeExpr::Other;
                }
                let Some(GenericArgument::Type(inner)) = args.args.first() else {
                    return TypeExpr::Other;
                };
                let inner = Box::new(Self::from_type(inner));
                if segment.ident == "Vec" {
                    TypeExpr::Array(inner)
                } else if segment.ident == "Option" {
                    TypeExpr::Pointer(inner)
                } else {
                    TypeExpr::Other
                }
            }
            PathArguments::Parenthesized(_) => TypeExpr::Other,
        }
    }

    /// Renders the canonical string for this type expression, or `None` if
    /// the shape is unsupported.
    ///
    /// Recursion is deliberately restricted: an array element may be an
    /// identifier, a qualified identifier or a pointer; a pointer target may
    /// be an identifier, a qualified identifier or an array. Everything else
    /// (array-of-array, pointer-to-pointer, deep qualifiers) is unresolved.
    pub fn resolve(&self) -> Option<String> {
        match self {
            TypeExpr::Ident(name) => Some(name.clone()),
            TypeExpr::Qualified { qualifier, member } => match qualifier.as_ref() {
                TypeExpr::Ident(q) => Some(format!("{q}::{member}")),
                _ => None,
            },
            TypeExpr::Array(elem) => match elem.as_ref() {
                TypeExpr::Ident(_) | TypeExpr::Qualified { .. } | TypeExpr::Pointer(_) => {
                    Some(format!("Vec<{}>", elem.resolve()?))
                }
                _ => None,
            },
            TypeExpr::Pointer(target) => match target.as_ref() {
                TypeExpr::Ident(_) | TypeExpr::Qualified { .. } | TypeExpr::Array(_) => {
                    Some(format!("Option<{}>", target.resolve()?))
                }
                _ => None,
            },
            TypeExpr::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::TypeExpr;

    fn resolve(ty: syn::Type) -> Option<String> {
        TypeExpr::from_type(&ty).resolve()
    }

    #[test]
    fn plain_identifiers_resolve_to_their_name() {
        assert_eq!(resolve(parse_quote!(i64)), Some("i64".to_owned()));
        assert_eq!(resolve(parse_quote!(String)), Some("String".to_owned()));
        assert_eq!(resolve(parse_quote!(u8)), Some("u8".to_owned()));
    }

    #[test]
    fn qualified_identifiers_keep_their_qualifier() {
        assert_eq!(
            resolve(parse_quote!(chrono::NaiveDateTime)),
            Some("chrono::NaiveDateTime".to_owned())
        );
    }

    #[test]
    fn deep_qualifiers_are_unresolved() {
        assert_eq!(resolve(parse_quote!(a::b::C)), None);
        assert_eq!(resolve(parse_quote!(std::collections::HashMap)), None);
    }

    #[test]
    fn arrays_and_pointers_recurse() {
        assert_eq!(resolve(parse_quote!(Vec<u8>)), Some("Vec<u8>".to_owned()));
        assert_eq!(
            resolve(parse_quote!(Option<String>)),
            Some("Option<String>".to_owned())
        );
        assert_eq!(
            resolve(parse_quote!(Vec<chrono::NaiveDate>)),
            Some("Vec<chrono::NaiveDate>".to_owned())
        );
    }

    #[test]
    fn pointer_to_array_and_array_of_pointer_are_distinct() {
        assert_eq!(
            resolve(parse_quote!(Option<Vec<u8>>)),
            Some("Option<Vec<u8>>".to_owned())
        );
        assert_eq!(
            resolve(parse_quote!(Vec<Option<u8>>)),
            Some("Vec<Option<u8>>".to_owned())
        );
    }

    #[test]
    fn disallowed_nesting_is_unresolved() {
        assert_eq!(resolve(parse_quote!(Option<Option<u8>>)), None);
        assert_eq!(resolve(parse_quote!(Vec<Vec<u8>>)), None);
    }

    #[test]
    fn unsupported_shapes_lower_to_other() {
        for ty in [
            parse_quote!(&str),
            parse_quote!([u8; 4]),
            parse_quote!((i32, i32)),
            parse_quote!(fn() -> i32),
            parse_quote!(Box<dyn std::fmt::Debug>),
            parse_quote!(HashMap<String, i32>),
            parse_quote!(std::vec::Vec<u8>),
        ] {
            assert_eq!(TypeExpr::from_type(&ty), TypeExpr::Other, "{ty:?}");
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let ty: syn::Type = parse_quote!(Option<Vec<sql::Blob>>);
        let expr = TypeExpr::from_type(&ty);
        assert_eq!(expr.resolve(), expr.resolve());
        assert_eq!(expr.resolve(), Some("Option<Vec<sql::Blob>>".to_owned()));
    }
}
