use derive_more::{Display, From};

/// Transport-level failure surfaced by the data fetcher.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum FetchError {
    #[display(fmt = "HTTP error: {}", _0)]
    HttpStatus(u16),
    #[display(fmt = "Network error: {}", _0)]
    Network(String),
    #[display(fmt = "Malformed JSON: {}", _0)]
    MalformedJson(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }
}

impl std::error::Error for FetchError {}

/// A well-formed payload the dashboard refuses to render.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ApplicationError {
    /// `success: false`, with the server's message when it sent one.
    #[display(fmt = "API reported failure: {}", _0)]
    Rejected(String),
    #[display(fmt = "payload has no boolean `success` flag")]
    MissingSuccessFlag,
    /// Payload deviates from the canonical contract.
    #[display(fmt = "payload contract violation: {}", _0)]
    Contract(String),
}

impl std::error::Error for ApplicationError {}

/// Expected page element is absent. Tolerated per field.
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "element `{}` not found", selector)]
pub struct BindingError {
    pub selector: String,
}

impl std::error::Error for BindingError {}

/// Chart backend could not construct an instance.
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "Rendering error: {}", _0)]
pub struct RenderError(pub String);

impl std::error::Error for RenderError {}

/// Failure of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    Fetch(FetchError),
    #[display(fmt = "{}", _0)]
    Application(ApplicationError),
}

impl std::error::Error for AppError {}

pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(FetchError::HttpStatus(503).to_string(), "HTTP error: 503");
        assert_eq!(
            AppError::from(ApplicationError::Rejected("x".into())).to_string(),
            "API reported failure: x"
        );
        assert_eq!(
            BindingError { selector: "#btc-period".into() }.to_string(),
            "element `#btc-period` not found"
        );
    }

    #[test]
    fn status_only_for_http_errors() {
        assert_eq!(FetchError::HttpStatus(404).status(), Some(404));
        assert_eq!(FetchError::Network("offline".into()).status(), None);
    }
}
