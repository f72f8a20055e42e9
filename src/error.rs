use crate::linter::{LintIssue, LintSeverity};
use std::fmt;

/// Error returned by descriptor building and code generation.
#[derive(Debug)]
pub enum GenerateError {
    /// The descriptor model failed validation
    ///
    /// Carries every issue found so they can be reported together.
    Invalid(Vec<LintIssue>),
    /// A binding with path parameters was generated for a basic-only router
    ///
    /// Basic routers cannot extract named segments, so the generated code
    /// could never serve this binding.
    PathParamsUnsupported {
        /// Owning service
        service: String,
        /// Owning method
        method: String,
        /// Binding index within the method
        index: usize,
        /// Path template of the binding
        path: String,
    },
    /// The implementation scaffold template failed to render
    Render(askama::Error),
}

impl GenerateError {
    /// Issues with error severity, if this is a validation failure.
    pub fn errors(&self) -> Vec<&LintIssue> {
        match self {
            GenerateError::Invalid(issues) => issues
                .iter()
                .filter(|i| i.severity == LintSeverity::Error)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Invalid(issues) => {
                write!(f, "descriptor validation failed with {} issue(s)", issues.len())?;
                for issue in issues {
                    write!(f, "\n  {}", issue)?;
                }
                Ok(())
            }
            GenerateError::PathParamsUnsupported {
                service,
                method,
                index,
                path,
            } => write!(
                f,
                "path parameters unsupported by the basic router: {}.{} binding {} ({})",
                service, method, index, path
            ),
            GenerateError::Render(err) => write!(f, "failed to render scaffold: {}", err),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<askama::Error> for GenerateError {
    fn from(err: askama::Error) -> Self {
        GenerateError::Render(err)
    }
}
