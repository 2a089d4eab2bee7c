use thiserror::Error;

/// Errors raised while reading or writing problem details documents.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid XML entity: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("document ended inside <{0}>")]
    Truncated(String),

    #[error("unexpected content after the root element: {0}")]
    TrailingContent(String),

    #[error("Status must be an integer, got '{0}'")]
    InvalidStatus(String),

    #[error("character {0:?} cannot appear in XML text")]
    InvalidChar(char),

    #[error("an empty key cannot be written as an element name")]
    EmptyKey,

    #[error("output file already exists: {0} (use --force to overwrite)")]
    OutputExists(String),
}

pub type Result<T> = std::result::Result<T, Error>;
