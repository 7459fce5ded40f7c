use log::debug;
use syn::{Fields, Item};

use crate::config::IncludeFilter;

use super::{
    expr::TypeExpr,
    structure::{FieldLine, FieldToken, StructToken},
};

/// Expands one field line into tokens, resolving the shared type once.
///
/// An unresolved type yields no tokens at all: unsupported field types are
/// dropped silently and simply do not occupy a position in the generated
/// contract.
pub fn extract_fields(line: &FieldLine) -> Vec<FieldToken> {
    let Some(typ) = line.ty.resolve() else {
        return Vec::new();
    };
    line.names
        .iter()
        .map(|name| FieldToken {
            name: name.clone(),
            typ: typ.clone(),
        })
        .collect()
}

/// Walks the top-level items of one parsed file and produces a token per
/// qualifying struct, in declaration order.
///
/// Only plain structs qualify: enums, traits, type aliases and the rest are
/// skipped, as are tuple structs (no field names to scan into) and generic
/// structs (the generated function could not name the concrete type). Unit
/// structs qualify with an empty field list.
pub fn collect_structs(
    file: &syn::File,
    namespace: &str,
    filter: &IncludeFilter,
) -> Vec<StructToken> {
    let selector = namespace.rsplit("::").next().unwrap_or("").to_owned();

    let mut tokens = Vec::new();
    for item in &file.items {
        let Item::Struct(item) = item else {
            continue;
        };
        let name = item.ident.to_string();
        if !filter.accepts(&name) {
            continue;
        }
        if !item.generics.params.is_empty() {
            debug!("Skipping generic struct {name}");
            continue;
        }

        let fields = match &item.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .flat_map(|field| {
                    let line = FieldLine {
                        // syn only ever exposes one name per field line.
                        names: vec![field.ident.as_ref().map(|i| i.to_string()).unwrap_or_default()],
                        ty: TypeExpr::from_type(&field.ty),
                    };
                    extract_fields(&line)
                })
                .collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                debug!("Skipping tuple struct {name}");
                continue;
            }
        };

        tokens.push(StructToken {
            namespace: namespace.to_owned(),
            selector: selector.clone(),
            name,
            fields,
        });
    }
    tokens
}
