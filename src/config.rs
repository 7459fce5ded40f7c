use std::collections::HashSet;

/// Parameters for a single codegen run.
///
/// The core takes everything it needs explicitly, so a run can be driven
/// from tests without touching process state. The binary fills in defaults
/// before handing this over.
#[derive(Debug, Clone)]
pub struct CodeGenConfig {
    /// Path of the generated file.
    pub output_file: String,
    /// Module name recorded in the generated file header.
    pub package_name: String,
    /// Generate private functions instead of `pub`.
    pub unexport: bool,
    /// Comma-delimited, case-sensitive struct names to include.
    /// `None` or empty means include everything.
    pub whitelist: Option<String>,
    /// Targets of the form `<module_path>=<source_path>`.
    pub targets: Vec<String>,
}

/// Allow-list of struct names, parsed once per run from the raw
/// comma-delimited specification.
#[derive(Debug, Clone)]
pub struct IncludeFilter {
    names: Option<HashSet<String>>,
}

impl IncludeFilter {
    pub fn parse(spec: Option<&str>) -> Self {
        let names = match spec {
            Some(s) if !s.is_empty() => {
                Some(s.split(',').map(|n| n.to_owned()).collect::<HashSet<_>>())
            }
            _ => None,
        };
        Self { names }
    }

    /// Exact, case-sensitive membership. An inactive filter accepts everything.
    pub fn accepts(&self, name: &str) -> bool {
        match &self.names {
            Some(names) => names.contains(name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IncludeFilter;

    #[test]
    fn absent_or_empty_spec_accepts_everything() {
        for filter in [IncludeFilter::parse(None), IncludeFilter::parse(Some(""))] {
            assert!(filter.accepts("Post"));
            assert!(filter.accepts("anything"));
        }
    }

    #[test]
    fn filter_is_case_sensitive_exact_match() {
        let filter = IncludeFilter::parse(Some("Post,User"));
        assert!(filter.accepts("Post"));
        assert!(filter.accepts("User"));
        assert!(!filter.accepts("post"));
        assert!(!filter.accepts("Pos"));
        assert!(!filter.accepts("Comment"));
    }
}
