use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme preference {value:?}; expected \"light\" or \"dark\"")]
pub struct ParseThemeError {
    pub value: String,
}

impl ParseThemeError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
