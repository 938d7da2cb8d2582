#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to fetch URL: {url} - {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Fetch timeout for URL: {0}")]
    FetchTimeout(String),

    #[error("Unexpected HTTP status {status} for URL: {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Response body for URL {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid playlist: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the server could not be reached or did not deliver a usable body,
    /// as opposed to delivering a playlist that failed to parse.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. }
                | Self::FetchTimeout(_)
                | Self::HttpStatus { .. }
                | Self::BodyTooLarge { .. }
        )
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::FetchTimeout(e.url().map(|u| u.to_string()).unwrap_or_default())
        } else {
            Self::FetchFailed {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        }
    }
}

/// Failure to turn playlist text into a [`crate::hls::Playlist`].
///
/// Any parse error rejects the whole playlist.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {kind}")]
    Line { line: usize, kind: LineError },

    #[error("playlist is not in extended M3U format")]
    NotExtendedM3u,
}

impl ParseError {
    /// 1-based source line of the failure, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Line { line, .. } => Some(*line),
            Self::NotExtendedM3u => None,
        }
    }
}

/// Failure on a single playlist line, before the line number is attached.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineError {
    #[error("malformed {0} tag")]
    MalformedTag(&'static str),

    #[error("malformed attribute `{attribute}` in {tag} tag")]
    MalformedAttribute { tag: &'static str, attribute: String },

    #[error("missing {attribute} attribute in {tag} tag")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },

    #[error("invalid {field} `{value}` in {tag} tag")]
    InvalidNumber {
        tag: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("unable to resolve `{reference}`: {source}")]
    UrlJoin {
        reference: String,
        source: url::ParseError,
    },
}

impl LineError {
    pub fn at(self, line: usize) -> ParseError {
        ParseError::Line { line, kind: self }
    }
}
