use std::fmt;

/// Which keyed collection a lookup missed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Property,
    SavedProperty,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Property => f.write_str("Property"),
            RecordKind::SavedProperty => f.write_str("Saved property"),
        }
    }
}

/// The only failure the listing core reports: a keyed lookup that did
/// not resolve to a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} not found: {key}")]
pub struct NotFoundError {
    pub kind: RecordKind,
    /// The key exactly as the caller supplied it
    pub key: String,
}

impl NotFoundError {
    pub fn property(key: impl fmt::Display) -> Self {
        Self {
            kind: RecordKind::Property,
            key: key.to_string(),
        }
    }

    pub fn saved_property(key: impl fmt::Display) -> Self {
        Self {
            kind: RecordKind::SavedProperty,
            key: key.to_string(),
        }
    }
}

pub type Result<T, E = NotFoundError> = std::result::Result<T, E>;
