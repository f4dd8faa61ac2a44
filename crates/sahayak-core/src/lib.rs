pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{Scheme, SchemeCatalog};
pub use config::SahayakConfig;
pub use error::{AgentError, Result};
pub use types::*;
