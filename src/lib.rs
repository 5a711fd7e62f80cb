//! Plain-text wiki served over HTTP
//!
//! Pages live as one file each under a data directory and are viewed,
//! edited and saved through `/view/{Title}`, `/edit/{Title}` and
//! `/save/{Title}`.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use types::{AppState, Operation, Page, Route};
pub use services::PageStore;
pub use components::{PathValidator, TemplateComponent};
pub use handlers::router;

// Re-export utility functions
pub use utils::{escape_attr, escape_html};
