use std::path::PathBuf;

use thiserror::Error;

pub type DiagramResult<T> = Result<T, DiagramError>;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("not a valid tree: {0}")]
    InvalidTree(String),

    #[error("unknown diagram type `{0}`")]
    UnknownDiagram(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("window host exited with code {0}")]
    WindowHost(i32),

    #[error("i/o failure on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
