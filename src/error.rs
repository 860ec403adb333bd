use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum PbiDocsError {
    #[error("input file does not exist: {0}")]
    InputNotFound(String),

    #[error("input path is not a file: {0}")]
    NotAFile(String),

    #[error("batch input is not a directory: {0}")]
    NotADirectory(String),

    #[error("unsupported input extension (expected .pbit): {0}")]
    UnsupportedExtension(String),

    #[error("input file is empty: {0}")]
    EmptyInput(String),

    #[error("not a valid zip archive: {0}")]
    InvalidArchive(String),

    #[error("model schema not found: {0}")]
    SchemaNotFound(String),

    #[error("schema parse error: {0}")]
    SchemaParse(String),

    #[error("schema shape error: {0}")]
    SchemaShape(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PbiDocsError>;
