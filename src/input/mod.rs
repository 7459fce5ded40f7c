use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use log::debug;

use crate::CodeGenError;

/// Resolved discovery targets: namespace label mapped to an ordered,
/// deduplicated list of source file paths.
///
/// Namespaces iterate in lexicographic order and paths are sorted within
/// each namespace, so a run over the same inputs always visits files in the
/// same order and the generated artifact is deterministic.
#[derive(Debug)]
pub struct TargetMap {
    files: BTreeMap<String, Vec<PathBuf>>,
}

impl TargetMap {
    /// Resolves raw `<module_path>=<source_path>` targets.
    ///
    /// The module path may be empty (same-module generation) but must
    /// otherwise parse as a Rust path, since it ends up in a `use` item.
    /// A file path is taken verbatim; a directory is walked recursively,
    /// skipping hidden entries and anything that is not a `.rs` file.
    pub fn resolve(targets: &[String]) -> Result<Self, CodeGenError> {
        if targets.is_empty() {
            return Err(CodeGenError::other("No target paths given"));
        }

        // Sets, so the same file passed twice only parses once.
        let mut files: BTreeMap<String, BTreeSet<PathBuf>> = BTreeMap::new();
        for target in targets {
            let components: Vec<&str> = target.split('=').collect();
            if components.len() != 2 {
                return Err(CodeGenError::bad_target(target));
            }
            let (namespace, path) = (components[0], components[1]);
            if !namespace.is_empty() {
                syn::parse_str::<syn::Path>(namespace)
                    .map_err(|_| CodeGenError::bad_target(target))?;
            }

            let path = Path::new(path);
            let meta = std::fs::metadata(path).map_err(|e| {
                CodeGenError::io(&format!("Failed to stat target path {}", path.display()), e)
            })?;

            let entry = files.entry(namespace.to_owned()).or_default();
            if meta.is_dir() {
                walk_dir(path, entry)?;
            } else {
                entry.insert(path.to_path_buf());
            }
        }

        Ok(Self {
            files: files
                .into_iter()
                .map(|(namespace, paths)| (namespace, paths.into_iter().collect()))
                .collect(),
        })
    }

    /// All (namespace, path) pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files.iter().flat_map(|(namespace, paths)| {
            paths
                .iter()
                .map(move |path| (namespace.as_str(), path.as_path()))
        })
    }
}

fn walk_dir(dir: &Path, out: &mut BTreeSet<PathBuf>) -> Result<(), CodeGenError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        CodeGenError::io(&format!("Failed to list files in path {}", dir.display()), e)
    })?;
    for entry in entries {
        let entry =
            entry.map_err(|e| CodeGenError::io("Failed to read directory entry", e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| CodeGenError::io("Failed to read directory entry", e))?;
        if file_type.is_dir() {
            walk_dir(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.insert(path);
        } else {
            debug!("Skipping non-source file {}", path.display());
        }
    }
    Ok(())
}

/// Reads and parses one source file. A file syn cannot parse is fatal for
/// the whole run; the error carries the offending path.
pub fn load_source(path: &Path) -> Result<syn::File, CodeGenError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CodeGenError::io(&format!("Failed to read file {}", path.display()), e)
    })?;
    syn::parse_file(&content).map_err(|e| CodeGenError::from(e).in_file(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::error::CodeGenErrorKind;

    use super::TargetMap;

    #[test]
    fn malformed_targets_are_rejected() {
        for target in ["tables.rs", "a=b=c", "a::b"] {
            let err = TargetMap::resolve(&[target.to_owned()]).unwrap_err();
            assert!(matches!(*err.kind, CodeGenErrorKind::BadTarget(_)), "{target}");
        }
    }

    #[test]
    fn module_label_must_be_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tables.rs");
        std::fs::write(&file, "struct A { x: i64 }").unwrap();
        let target = format!("not a path={}", file.display());
        let err = TargetMap::resolve(&[target]).unwrap_err();
        assert!(matches!(*err.kind, CodeGenErrorKind::BadTarget(_)));
    }

    #[test]
    fn missing_path_is_fatal() {
        let err = TargetMap::resolve(&["tables=/no/such/path.rs".to_owned()]).unwrap_err();
        assert!(matches!(*err.kind, CodeGenErrorKind::Io(_, _)));
    }

    #[test]
    fn directory_targets_are_walked_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(dir.path().join("b.rs"), "").unwrap();
        std::fs::write(dir.path().join("a.rs"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.rs"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "docs").unwrap();
        std::fs::write(sub.join("c.rs"), "").unwrap();
        let mut f = std::fs::File::create(dir.path().join("d.txt")).unwrap();
        writeln!(f, "not source").unwrap();

        // The same directory twice must not duplicate entries.
        let target = format!("tables={}", dir.path().display());
        let map = TargetMap::resolve(&[target.clone(), target]).unwrap();
        let names: Vec<_> = map
            .iter()
            .map(|(_, p)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.rs", "b.rs", "c.rs"]);
    }
}
