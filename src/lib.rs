pub mod config;
pub mod error;
pub mod flows;
pub mod llm;
pub mod pipeline;
pub mod server;
pub mod session;
pub mod validation;

pub use error::{Error, Result};
