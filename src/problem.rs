use crate::ordered::{Extensions, ValidationErrors};

/// Title used by [`ValidationProblemDetails::from_errors`].
pub const DEFAULT_VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// A problem details record: fixed descriptive fields plus extension members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type.
    pub type_uri: Option<String>,
    pub title: Option<String>,
    /// HTTP status code. Any `i32` is carried as is; the range is not checked.
    pub status: Option<i32>,
    pub detail: Option<String>,
    pub instance: Option<String>,
    pub extensions: Extensions,
}

impl ProblemDetails {
    pub fn new() -> Self {
        ProblemDetails::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extensions.insert(key, value.into());
        self
    }

    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }
}

/// Problem details carrying per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationProblemDetails {
    pub problem: ProblemDetails,
    pub errors: ValidationErrors,
}

impl ValidationProblemDetails {
    pub fn new() -> Self {
        ValidationProblemDetails::default()
    }

    /// Wraps `errors` with the standard validation title.
    pub fn from_errors(errors: ValidationErrors) -> Self {
        ValidationProblemDetails {
            problem: ProblemDetails::new().with_title(DEFAULT_VALIDATION_TITLE),
            errors,
        }
    }
}
