//! Code generation for positional row scanning.
//!
//! Parses Rust source files, collects struct declarations, and generates
//! one function per struct that decodes a database row into an instance of
//! it, field by field in declared order. See [`run_codegen`] for the
//! pipeline entry point.

mod config;
mod error;
mod gen;
mod input;
mod types;

use log::{debug, info};

pub use config::{CodeGenConfig, IncludeFilter};
pub use error::{CodeGenError, CodeGenErrorKind};
pub use gen::{aggregate_namespaces, CodeGenerator};
pub use input::{load_source, TargetMap};
pub use types::{collect_structs, extract_fields, FieldLine, FieldToken, StructToken, TypeExpr};

/// Runs one full generation pass: resolve targets, parse each source file,
/// collect structs, render, write.
///
/// Every fatal condition aborts the run. The artifact is rendered in full
/// before the output file is touched, so a failing run never leaves a
/// partial file behind.
pub fn run_codegen(config: &CodeGenConfig) -> Result<(), CodeGenError> {
    let targets = TargetMap::resolve(&config.targets)?;
    let filter = IncludeFilter::parse(config.whitelist.as_deref());

    let mut structs = Vec::new();
    for (namespace, path) in targets.iter() {
        let ast = load_source(path)?;
        let collected = collect_structs(&ast, namespace, &filter);
        debug!("Collected {} structs from {}", collected.len(), path.display());
        structs.extend(collected);
    }
    info!("Collected {} structs in total", structs.len());

    let generator = CodeGenerator::new(
        config.package_name.clone(),
        config.unexport,
        structs,
    );
    let rendered = generator.render()?;

    std::fs::write(&config.output_file, rendered).map_err(|e| {
        CodeGenError::io(
            &format!("Failed to write generated file {}", config.output_file),
            e,
        )
    })?;
    info!("Wrote {}", config.output_file);

    Ok(())
}
