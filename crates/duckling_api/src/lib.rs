pub mod client;
pub mod error;
pub mod models;

pub use client::{ConsoleApi, HttpConsoleApi};
pub use error::{ApiError, Result};
pub use models::{
    ConnectionConfig, ConnectionList, ConnectionStatus, MessageResponse,
    QueryResult, ResultRow, SaveConnectionRequest, SaveResponse,
};
