//! Server lifecycle errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failed: {0}")]
    Serve(#[from] std::io::Error),

    #[error(transparent)]
    App(#[from] shared::AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
