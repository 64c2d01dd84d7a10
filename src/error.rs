// Typed configuration errors. Callers log these and fall back to defaults.

/// Errors raised while interpreting configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A unit key that is not in the unit table for its metric.
    #[error("unknown {kind} unit: {value:?}")]
    UnknownUnit { kind: &'static str, value: String },

    /// A disk output format that is not one of the four known formats.
    #[error("unknown disk format: {0:?}")]
    UnknownFormat(String),

    /// A color that is not in `#RRGGBB` form.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}
