use std::sync::Arc;

use crate::components::{PathValidator, TemplateComponent};
use crate::services::PageStore;

/// Application state shared across all handlers. Nothing in it is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub templates: Arc<TemplateComponent>,
    pub validator: PathValidator,
}

impl AppState {
    pub fn new(store: PageStore, templates: TemplateComponent) -> Self {
        Self { store, templates: Arc::new(templates), validator: PathValidator::new() }
    }
}

/// A wiki page. The title doubles as the storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// A page with no body yet
    pub fn empty(title: impl Into<String>) -> Self {
        Self { title: title.into(), body: Vec::new() }
    }
}

/// The three operations a wiki path can address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }

    /// URL path for this operation on `title`
    pub fn path(self, title: &str) -> String {
        format!("/{}/{}", self.as_str(), title)
    }
}

/// A validated request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation: Operation,
    pub title: String,
}
