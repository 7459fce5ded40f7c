use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeGenErrorKind {
    #[error("Invalid target, expected <module_path=source_path>, got {0}")]
    BadTarget(String),
    #[error("Failed to parse source: {0}")]
    Syn(#[from] syn::Error),
    #[error("No structs found to generate")]
    NothingToGenerate,
    #[error("{0}")]
    Other(String),
    #[error("{0}: {1}")]
    Io(String, std::io::Error),
}

#[derive(Error, Debug)]
pub struct CodeGenError {
    #[source]
    pub kind: Box<CodeGenErrorKind>,
    pub context: Option<String>,
    pub file: Option<String>,
}

impl Display for CodeGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Code generation failed: {}", self.kind)?;
        if let Some(context) = &self.context {
            write!(f, ", while {context}")?;
        }
        if let Some(file) = &self.file {
            write!(f, ", in file {file}")?;
        }
        Ok(())
    }
}

impl From<syn::Error> for CodeGenError {
    fn from(value: syn::Error) -> Self {
        Self::new(value.into())
    }
}

impl CodeGenError {
    pub fn new(kind: CodeGenErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            context: None,
            file: None,
        }
    }

    pub fn io(msg: &str, e: std::io::Error) -> Self {
        Self::new(CodeGenErrorKind::Io(msg.to_owned(), e))
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(CodeGenErrorKind::Other(msg.into()))
    }

    pub fn bad_target(target: impl Into<String>) -> Self {
        Self::new(CodeGenErrorKind::BadTarget(target.into()))
    }

    pub fn nothing_to_generate() -> Self {
        Self::new(CodeGenErrorKind::NothingToGenerate)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}
