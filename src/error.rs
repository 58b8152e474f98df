use thiserror::Error;

/// Faults surfaced by the check and download workflows.
///
/// Remote faults keep the URL that was being fetched so the UI can offer it
/// for retry in a browser. Cancellation travels the same channel but is a
/// user decision, not a failure.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unable to reach {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("unexpected page structure at {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("download cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn connect(url: &str, reason: impl ToString) -> Self {
        FetchError::Connect {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(url: &str, reason: impl ToString) -> Self {
        FetchError::Parse {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// The URL the failed operation was reaching for, if any.
    #[must_use]
    pub fn origin_url(&self) -> Option<&str> {
        match self {
            FetchError::Connect { url, .. } | FetchError::Parse { url, .. } => Some(url),
            FetchError::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_origin_url() {
        let err = FetchError::connect("https://example.com/live", "timed out");
        assert_eq!(err.origin_url(), Some("https://example.com/live"));
    }

    #[test]
    fn cancellation_has_no_url() {
        assert_eq!(FetchError::Cancelled.origin_url(), None);
    }
}
