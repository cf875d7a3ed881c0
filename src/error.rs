use std::fmt;

/// Errors raised by the UI chrome
#[derive(Debug)]
pub enum UiError {
    /// Grid spacing must be non-zero on both axes
    InvalidGrid { spacing: (u32, u32) },

    /// A menu label does not fit inside its widget
    LabelOverflow {
        label: String,
        needed: u32,
        available: u32,
    },

    /// Menu command referenced a section or option that doesn't exist
    UnknownOption { section: String, label: String },

    /// Reading the config file failed
    Io(std::io::Error),

    /// Config file is not valid JSON for `UiConfig`
    Config(serde_json::Error),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::InvalidGrid { spacing } => {
                write!(f, "Invalid grid spacing: {}x{}", spacing.0, spacing.1)
            }
            UiError::LabelOverflow { label, needed, available } => {
                write!(
                    f,
                    "Label '{}' overflows its widget (needs {}px, has {}px)",
                    label, needed, available
                )
            }
            UiError::UnknownOption { section, label } => {
                write!(f, "Unknown menu option: {} / {}", section, label)
            }
            UiError::Io(e) => write!(f, "IO error: {}", e),
            UiError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for UiError {}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        UiError::Io(err)
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Config(err)
    }
}

impl From<UiError> for String {
    fn from(error: UiError) -> Self {
        error.to_string()
    }
}
