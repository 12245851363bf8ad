use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image must be at most 5MB")]
    FileTooLarge { size: usize },

    #[error("Please choose an image file")]
    InvalidFileType { content_type: String },

    #[error("Failed to read image: {0}")]
    Unreadable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngredientError {
    #[error("Ingredient index {index} out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The last ingredient cannot be removed")]
    LastIngredient,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("A submission is already in progress")]
    Busy,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Missing required field: ingredients[{index}][{field}]")]
    MissingIngredientField { index: usize, field: &'static str },

    #[error("Duration must be a whole number of minutes, got '{0}'")]
    InvalidDuration(String),
}

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Non-2xx response. The body is deliberately not surfaced.
    #[error("Failed to save recipe")]
    SaveFailed { status: u16 },

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response from recipe API: {0}")]
    InvalidResponse(String),

    /// Any other failure, carrying its own message (which may be empty).
    #[error("{0}")]
    Fault(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}
