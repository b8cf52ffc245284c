use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Endpoint response is not a JSON object: {0}")]
    Decode(String),

    #[error("Failed to deliver reply: {0}")]
    Respond(String),
}
