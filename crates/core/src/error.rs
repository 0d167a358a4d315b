use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    /// TOML parse / deserialization error (presets, session config).
    ConfigParse(String),
    /// Semantic validation error.
    Validation(String),
    /// Decimal and thousands separators must differ.
    SeparatorConflict { decimal: char, thousands: char },
    /// Field name not in the row field table.
    UnknownField(String),
    /// Row id not present in the session.
    UnknownRow(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::SeparatorConflict { decimal, thousands } => write!(
                f,
                "decimal separator '{decimal}' and thousands separator '{thousands}' must differ"
            ),
            Self::UnknownField(name) => write!(f, "unknown row field: {name}"),
            Self::UnknownRow(id) => write!(f, "unknown row id: {id}"),
        }
    }
}

impl std::error::Error for CoreError {}
