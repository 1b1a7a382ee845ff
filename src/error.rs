use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramelogicError {
    #[error("Invalid range: minimum {min} is greater than maximum {max}")]
    InvalidRange { min: String, max: String },
    #[error("Empty enumeration: the set of allowed values cannot be empty")]
    EmptyEnumeration,
    #[error("Incompatible constraint kinds: cannot intersect {left} with {right}")]
    IncompatibleConstraintKinds { left: &'static str, right: &'static str },
    #[error("Role conflict: variable '{variable}' is {left} in one frame and {right} in the other")]
    RoleConflict { variable: String, left: String, right: String },
    #[error("Frame arguments mismatch. Required: {required:?}, Provided: {provided:?}")]
    ArgumentMismatch { required: Vec<String>, provided: Vec<String> },
    #[error("Argument '{variable}' (uid='{uid}') violates type '{concept}'")]
    TypeViolation { variable: String, uid: String, concept: String },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FramelogicError>;

// Helper conversions
impl From<config::ConfigError> for FramelogicError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
