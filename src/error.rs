use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid tuning value for `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
    #[error("malformed JSON")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("DOM element `{0}` not found")]
    MissingElement(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}
