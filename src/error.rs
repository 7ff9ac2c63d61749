use thiserror::Error;

use crate::core::table::TableError;

#[derive(Error, Debug)]
pub enum PooldoseError {
    #[error("config error: {0}")]
    Config(#[from] TableError),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
pub type Result<T> = std::result::Result<T, PooldoseError>;
