pub mod path_validator;
pub mod templates;

pub use path_validator::PathValidator;
pub use templates::TemplateComponent;
