use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{any, MethodRouter},
    Router,
};

use crate::components::templates::{EDIT, VIEW};
use crate::errors::WikiError;
use crate::types::{AppState, Operation, Page};
use crate::utils::form_value;

/// Form field holding the page body
const BODY_FIELD: &str = "body";

/// Build the wiki router. Each operation prefix gets its own wrapped handler;
/// everything else is a 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/view/*rest", make_handler(Operation::View))
        .route("/edit/*rest", make_handler(Operation::Edit))
        .route("/save/*rest", make_handler(Operation::Save))
        .fallback(handle_not_found)
        .with_state(state)
}

/// Wrap a title-taking operation into a request handler that validates the
/// path first
pub fn make_handler(operation: Operation) -> MethodRouter<AppState> {
    any(move |State(state): State<AppState>, req: Request| async move {
        dispatch(operation, state, req).await
    })
}

/// Validate the request path and run `operation` on the extracted title.
///
/// The handler is never invoked for a path that does not validate, or that
/// validates to a different operation than the one mounted.
pub async fn dispatch(operation: Operation, state: AppState, req: Request) -> Response {
    let path = req.uri().path().to_string();
    let route = match state.validator.validate(&path) {
        Some(route) if route.operation == operation => route,
        _ => {
            log::warn!("Rejected {} request for invalid path: '{}'", operation.as_str(), path);
            return WikiError::NotFound.into_response();
        }
    };

    log::debug!("{} {} -> {} '{}'", req.method(), path, operation.as_str(), route.title);
    match operation.handle(&state, &route.title, req).await {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("{} '{}' failed: {}", operation.as_str(), route.title, e);
            e.into_response()
        }
    }
}

impl Operation {
    /// Run this operation for an already validated title
    pub async fn handle(self, state: &AppState, title: &str, req: Request) -> Result<Response, WikiError> {
        match self {
            Operation::View => view_handler(state, title),
            Operation::Edit => edit_handler(state, title),
            Operation::Save => {
                let body = read_body_field(req, state).await?;
                save_handler(state, title, body)
            }
        }
    }
}

/// Raw bytes of the first `body` form field.
///
/// POST, PUT and PATCH bodies are read as urlencoded or multipart forms
/// according to their content type; a body value there wins over one in the
/// query string. Any other payload is ignored. No field at all is an empty body.
pub async fn read_body_field(req: Request, state: &AppState) -> Result<Vec<u8>, WikiError> {
    let from_query = req.uri().query().and_then(|q| form_value(q.as_bytes(), BODY_FIELD));
    let reads_payload = [Method::POST, Method::PUT, Method::PATCH].contains(req.method());
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    let from_payload = if !reads_payload {
        None
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let bytes = Bytes::from_request(req, state).await?;
        form_value(&bytes, BODY_FIELD)
    } else if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, state).await?;
        let mut field_body = None;
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some(BODY_FIELD) {
                field_body = Some(field.bytes().await?.to_vec());
                break;
            }
        }
        field_body
    } else {
        log::debug!("Ignoring save payload with content type '{}'", content_type);
        None
    };

    Ok(from_payload.or(from_query).unwrap_or_default())
}

/// Render a stored page, or send the client to the editor if it cannot be loaded
pub fn view_handler(state: &AppState, title: &str) -> Result<Response, WikiError> {
    let page = match state.store.load(title) {
        Ok(page) => page,
        Err(_) => {
            log::info!("Page '{}' not available, redirecting to editor", title);
            return Ok(found(&Operation::Edit.path(title)));
        }
    };

    let html = state.templates.render(VIEW, &page)?;
    log::info!("Serving page '{}'", title);
    Ok(Html(html).into_response())
}

/// Render the edit form; a page that cannot be loaded is edited from empty
pub fn edit_handler(state: &AppState, title: &str) -> Result<Response, WikiError> {
    let page = state.store.load(title).unwrap_or_else(|_| {
        log::debug!("Editing new page '{}'", title);
        Page::empty(title)
    });

    let html = state.templates.render(EDIT, &page)?;
    log::info!("Serving editor for '{}'", title);
    Ok(Html(html).into_response())
}

/// Store the submitted body and redirect to the page view
pub fn save_handler(state: &AppState, title: &str, body: Vec<u8>) -> Result<Response, WikiError> {
    let page = Page::new(title, body);
    state.store.save(&page)?;
    Ok(found(&Operation::View.path(title)))
}

async fn handle_not_found(uri: Uri) -> WikiError {
    log::warn!("Path not found: '{}'", uri.path());
    WikiError::NotFound
}

/// 302 Found with a Location header
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
