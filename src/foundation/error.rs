use crate::foundation::core::BackendId;
use crate::primitive::data::PrimitiveType;

/// Convenience result type used across tessera.
pub type TesseraResult<T> = Result<T, TesseraError>;

/// Outcome of a typed render operation.
///
/// `Ok(())` is success; the two error kinds a backend reports are
/// [`TesseraError::NotSupported`] and [`TesseraError::Fail`].
pub type RenderResult = TesseraResult<()>;

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum TesseraError {
    /// The backend lacks the requested primitive type or operation.
    ///
    /// Callers can work around it by trying another backend or by converting the
    /// primitive into a representation a capable backend understands.
    #[error("not supported: {backend} cannot render {primitive:?}")]
    NotSupported {
        /// Backend that declined.
        backend: BackendId,
        /// Primitive type that was requested.
        primitive: PrimitiveType,
    },

    /// Backend-internal failure for the current attempt (invalid or zero-sized resources).
    #[error("render failure: {0}")]
    Fail(String),

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TesseraError {
    /// Build a [`TesseraError::NotSupported`] value.
    pub fn not_supported(backend: BackendId, primitive: PrimitiveType) -> Self {
        Self::NotSupported { backend, primitive }
    }

    /// Build a [`TesseraError::Fail`] value.
    pub fn fail(msg: impl Into<String>) -> Self {
        Self::Fail(msg.into())
    }

    /// Build a [`TesseraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` for a capability gap that another backend might cover.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
