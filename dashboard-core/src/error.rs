use thiserror::Error;

/// Failure of a submitted weather lookup, as shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("City not found")]
    CityNotFound,

    /// Transport, status or decoding failure in either request. The source is
    /// kept for logs only; the UI sees the fixed message.
    #[error("City not found or API error")]
    Api(#[source] anyhow::Error),
}

impl FetchError {
    /// The full cause chain, for logs.
    pub fn detail(&self) -> String {
        match self {
            FetchError::CityNotFound => self.to_string(),
            FetchError::Api(source) => format!("{source:#}"),
        }
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        FetchError::Api(err)
    }
}
