/// Convenience result type used across glasspane.
pub type GlassResult<T> = Result<T, GlassError>;

/// Boundary error taxonomy.
///
/// Controllers never fail at runtime; these errors only surface while loading or validating
/// configuration, page models, scripts and selectors, or when a host call is rejected.
#[derive(thiserror::Error, Debug)]
pub enum GlassError {
    /// Invalid configuration or out-of-range user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A selector string could not be parsed.
    #[error("selector error: {0}")]
    Selector(String),

    /// The page model is malformed (duplicate ids, bad geometry, unknown nodes).
    #[error("page error: {0}")]
    Page(String),

    /// An interaction script step cannot be executed.
    #[error("script error: {0}")]
    Script(String),

    /// The contact form rejected an operation.
    #[error("form error: {0}")]
    Form(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlassError {
    /// Build a [`GlassError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlassError::Selector`] value.
    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    /// Build a [`GlassError::Page`] value.
    pub fn page(msg: impl Into<String>) -> Self {
        Self::Page(msg.into())
    }

    /// Build a [`GlassError::Script`] value.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Build a [`GlassError::Form`] value.
    pub fn form(msg: impl Into<String>) -> Self {
        Self::Form(msg.into())
    }

    /// Build a [`GlassError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
