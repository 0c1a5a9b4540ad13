use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("symbol {0} missing from quote response")]
    MissingSymbol(String),

    #[error("invalid quote payload: {0}")]
    InvalidResponse(String),
}
