pub mod config;
pub mod error;
pub mod frontend;
pub mod models;
pub mod server;
pub mod upstream;

pub use error::{Error, Result};
