use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} {reason}")]
    Invalid { name: &'static str, reason: String },
}
