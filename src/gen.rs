use std::collections::BTreeSet;

use convert_case::{Case, Casing};
use proc_macro2::{Literal, Span};
use quote::quote;
use syn::{parse_quote, parse_str, Ident, Item, ItemFn, ItemUse, Type, Visibility};

use crate::{error::CodeGenError, types::StructToken};

/// Distinct namespaces referenced by the collected structs, sorted
/// lexicographically. The empty namespace (same-module generation) never
/// produces an import.
pub fn aggregate_namespaces(structs: &[StructToken]) -> Vec<String> {
    structs
        .iter()
        .filter(|t| !t.namespace.is_empty())
        .map(|t| t.namespace.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Renders the generated artifact from the full ordered struct sequence.
pub struct CodeGenerator {
    package_name: String,
    unexport: bool,
    structs: Vec<StructToken>,
}

impl CodeGenerator {
    pub fn new(package_name: String, unexport: bool, structs: Vec<StructToken>) -> Self {
        Self {
            package_name,
            unexport,
            structs,
        }
    }

    /// Renders the whole artifact to a string, or fails with the distinct
    /// empty-result error if there is nothing to generate. Rendering goes
    /// through syn items, so the output is re-parseable by construction.
    pub fn render(&self) -> Result<String, CodeGenError> {
        if self.structs.is_empty() {
            return Err(CodeGenError::nothing_to_generate());
        }

        let mut items: Vec<Item> = Vec::new();
        for namespace in aggregate_namespaces(&self.structs) {
            let import: ItemUse = parse_str(&format!("use {namespace};"))
                .map_err(|e| CodeGenError::from(e).with_context("rendering import block"))?;
            items.push(Item::Use(import));
        }
        for token in &self.structs {
            items.push(Item::Fn(self.scan_fn(token)?));
        }
        let file = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items,
        };

        let mut out = format!(
            "//! Row scan functions for `{}`.\n//!\n//! Generated by scangen. Do not edit.\n\n",
            self.package_name
        );
        out.push_str(&prettyplease::unparse(&file));
        Ok(out)
    }

    fn scan_fn(&self, token: &StructToken) -> Result<ItemFn, CodeGenError> {
        let fn_name = Ident::new(
            &format!("scan_{}", token.name.to_case(Case::Snake)),
            Span::call_site(),
        );
        let vis: Visibility = if self.unexport {
            Visibility::Inherited
        } else {
            parse_quote!(pub)
        };
        let target: Type = if token.selector.is_empty() {
            parse_str(&token.name)
        } else {
            parse_str(&format!("{}::{}", token.selector, token.name))
        }
        .map_err(|e| {
            CodeGenError::from(e).with_context(format!("rendering struct {}", token.name))
        })?;

        let mut fields = quote! {};
        for (index, field) in token.fields.iter().enumerate() {
            // parse_str, not Ident::new, so raw identifiers survive.
            let name: Ident = parse_str(&field.name).map_err(|e| {
                CodeGenError::from(e)
                    .with_context(format!("rendering field {} of {}", field.name, token.name))
            })?;
            let typ: Type = parse_str(&field.typ).map_err(|e| {
                CodeGenError::from(e)
                    .with_context(format!("rendering field {} of {}", field.name, token.name))
            })?;
            let index = Literal::usize_unsuffixed(index);
            fields.extend(quote! {
                #name: row.get::<_, #typ>(#index)?,
            });
        }

        Ok(parse_quote! {
            #vis fn #fn_name(row: &rusqlite::Row<'_>) -> rusqlite::Result<#target> {
                Ok(#target { #fields })
            }
        })
    }
}
