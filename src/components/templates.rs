use std::collections::HashMap;
use std::fs;
use std::path::Path;
use log::{debug, info, warn};
use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::{escape_attr, escape_html};

pub const VIEW: &str = "view";
pub const EDIT: &str = "edit";

const DEFAULT_VIEW: &str = "<!doctype html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>{{TITLE}}</title></head>
<body>
<h1>{{TITLE}}</h1>
<p>[<a href=\"/edit/{{TITLE}}\">edit</a>]</p>
<div>{{BODY}}</div>
</body>
</html>
";

const DEFAULT_EDIT: &str = "<!doctype html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>Editing {{TITLE}}</title></head>
<body>
<h1>Editing {{TITLE}}</h1>
<form action=\"/save/{{TITLE}}\" method=\"POST\">
<div><textarea name=\"body\" rows=\"20\" cols=\"80\">{{BODY}}</textarea></div>
<div><input type=\"submit\" value=\"Save\"></div>
</form>
</body>
</html>
";

/// The parsed template set, loaded once at startup and read-only afterwards.
///
/// Templates are plain HTML with `{{TITLE}}` and `{{BODY}}` placeholders; both
/// are escaped on substitution.
pub struct TemplateComponent {
    templates: HashMap<&'static str, String>,
}

impl TemplateComponent {
    /// Template set built from the defaults only
    pub fn new() -> Self {
        let templates = [(VIEW, DEFAULT_VIEW.to_string()), (EDIT, DEFAULT_EDIT.to_string())]
            .into_iter()
            .collect();
        Self { templates }
    }

    /// Load `view.html` and `edit.html` from `dir`, falling back to the
    /// built-in template for any file that cannot be read
    pub fn load(dir: &Path) -> Self {
        let mut set = Self::new();
        for name in [VIEW, EDIT] {
            let path = dir.join(format!("{}.html", name));
            match fs::read_to_string(&path) {
                Ok(tpl) => {
                    info!("Loaded template '{}' from {:?}", name, path);
                    set.templates.insert(name, tpl);
                }
                Err(e) => warn!("Using built-in '{}' template, cannot read {:?}: {}", name, path, e),
            }
        }
        set
    }

    /// Render the named template with a page
    pub fn render(&self, name: &str, page: &Page) -> Result<String, WikiError> {
        let tpl = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::Template(format!("template: no template {:?} associated with template set", name)))?;

        debug!("Rendering template '{}' for page '{}'", name, page.title);
        let body = String::from_utf8_lossy(&page.body);
        Ok(tpl
            .replace("{{TITLE}}", &escape_attr(&page.title))
            .replace("{{BODY}}", &escape_html(&body)))
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn renders_title_and_escaped_body() {
        let templates = TemplateComponent::new();
        let html = templates.render(VIEW, &Page::new("Test", "<b>hi</b> & bye")).unwrap();
        assert!(html.contains("<h1>Test</h1>"));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt; &amp; bye"));
        assert!(html.contains("href=\"/edit/Test\""));
    }

    #[test]
    fn edit_form_posts_to_save() {
        let templates = TemplateComponent::new();
        let html = templates.render(EDIT, &Page::empty("NewPage")).unwrap();
        assert!(html.contains("action=\"/save/NewPage\""));
        assert!(html.contains("<textarea name=\"body\" rows=\"20\" cols=\"80\"></textarea>"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let templates = TemplateComponent::new();
        assert!(matches!(templates.render("list", &Page::empty("X")), Err(WikiError::Template(_))));
    }

    #[test]
    fn load_prefers_files_and_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("view.html"), "V:{{TITLE}}={{BODY}}").unwrap();

        let templates = TemplateComponent::load(dir.path());
        assert_eq!(templates.render(VIEW, &Page::new("A", "b")).unwrap(), "V:A=b");
        assert!(templates.render(EDIT, &Page::empty("A")).unwrap().contains("Editing A"));
    }
}
