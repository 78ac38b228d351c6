use crate::taxonomy::TaxonomyError;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Search parameter that failed to translate into a provider's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchParam {
    Query,
    Order,
    Sort,
    Types,
    Genres,
    Status,
}

impl fmt::Display for SearchParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchParam::Query => "query",
            SearchParam::Order => "order",
            SearchParam::Sort => "sort",
            SearchParam::Types => "types",
            SearchParam::Genres => "genres",
            SearchParam::Status => "status",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build request for {url}: {reason}")]
    BuildingRequest { url: String, reason: String },

    #[error("request to {url} failed")]
    HttpRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to parse html of {url}: {reason}")]
    ParsingHtml { url: String, reason: String },

    #[error("failed to decode json ({context})")]
    ParsingJson {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid url `{url}`")]
    ParsingUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to extract {what} from {url}")]
    ExtractingData { url: String, what: String },

    #[error("{stage} answered with result `{result}`")]
    ResponseNotOk { stage: String, result: String },

    #[error("invalid search parameter `{param}`")]
    InvalidSearch {
        param: SearchParam,
        #[source]
        source: TaxonomyError,
    },

    #[error("search row {index} of {url} has no serie id")]
    InvalidSerieId { url: String, index: usize },

    #[error("search row {index} of {url} has no cover")]
    InvalidCover { url: String, index: usize },

    #[error("failed to build url for serie `{serie_id}`: {reason}")]
    BuildingUrl { serie_id: String, reason: String },

    #[error("{stage} did not finish within {secs}s")]
    Timeout { stage: String, secs: u64 },

    #[error("{stage} was cancelled")]
    Cancelled { stage: String },

    #[error("invalid taxonomy table")]
    Taxonomy(#[from] TaxonomyError),

    #[error("unknown source `{0}`")]
    UnknownSource(String),
}

impl SourceError {
    pub fn cancelled(stage: impl Into<String>) -> Self {
        SourceError::Cancelled { stage: stage.into() }
    }

    pub fn invalid_search(param: SearchParam) -> impl FnOnce(TaxonomyError) -> Self {
        move |source| SourceError::InvalidSearch { param, source }
    }
}
