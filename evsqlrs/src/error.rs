use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvsqlError>;

#[derive(Debug, Error)]
pub enum EvsqlError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sql parse error: {0}")]
    Parse(#[from] sqlparser::parser::ParserError),
    #[error("statement structure error: {0}")]
    Structure(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("execution error: {0}")]
    Execution(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
