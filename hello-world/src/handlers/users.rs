//! `/user(s)` requests.
//!
//! Decision order:
//! 1. `GET /users`: sample listing, `page` query parameter defaults to 1
//! 2. `GET` with an `id` path parameter: lookup, `null` body when absent
//! 3. `POST` with a non-empty body: create, `201`
//! 4. anything else: `400`
//!
//! Errors raised while handling are answered here with a generic `500`. Create-time validation
//! failures take that path too unless strict validation is enabled, in which case they are
//! reported as `400`.

use http::StatusCode;
use serde_json::Value;

use crate::error::{UserHandlerError, ValidationError};
use crate::event::HttpRequest;
use crate::response::Response;
use crate::serde_ext::is_truthy;
use crate::users::{NewUser, UserService};

pub const INVALID_ID: &str = "Bad Request - El id debe ser un numero mayor a 0";
pub const UNPROCESSABLE: &str = "Bad Request - No se pudo procesar la solicitud";
pub const SERVER_ERROR: &str = "Server Error - Error al procesar la solicitud";

const DEFAULT_PAGE: u32 = 1;

#[derive(Clone, Default)]
pub struct UserHandler {
    service: UserService,
    strict_validation: bool,
}

impl UserHandler {
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            strict_validation: false,
        }
    }

    /// Report create-time validation failures as `400` instead of folding them into `500`.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub async fn handle(&self, request: &HttpRequest) -> Response {
        match self.try_handle(request).await {
            Ok(resp) => resp,
            Err(UserHandlerError::Validation(err)) if self.strict_validation => err.into(),
            Err(err) => {
                tracing::error!(error = %err, path = %request.path, "user request failed");
                Response::message(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
            }
        }
    }

    async fn try_handle(&self, request: &HttpRequest) -> Result<Response, UserHandlerError> {
        let method = request.http_method.as_str();

        if method == "GET" && request.path == "/users" {
            let page = parse_page(request.query_parameter("page"));
            let users = self.service.list(Some(page)).await;
            return Ok(Response::json(StatusCode::OK, &users));
        }

        if method == "GET" {
            if let Some(raw_id) = request.path_parameter("id").filter(|id| !id.is_empty()) {
                let Some(id) = parse_id(raw_id) else {
                    return Ok(Response::message(StatusCode::BAD_REQUEST, INVALID_ID));
                };
                let user = match id {
                    UserId::Valid(id) => self.service.get_by_id(id).await,
                    UserId::OutOfRange => None,
                };
                return Ok(Response::json(StatusCode::OK, &user));
            }
        }

        if method == "POST" {
            if let Some(body) = request.body.as_ref().filter(|body| is_truthy(body)) {
                let Value::String(text) = body else {
                    return Err(UserHandlerError::NonTextBody);
                };
                let document: Value = serde_json::from_str(text)?;
                let user = self.service.create(NewUser::from_body(&document)).await?;
                return Ok(Response::json(StatusCode::CREATED, &user));
            }
        }

        tracing::info!(
            path = %request.path,
            http_method = %request.http_method,
            path_parameters = ?request.path_parameters,
            query_string_parameters = ?request.query_string_parameters,
            body = ?request.body,
            "unprocessed user request"
        );
        Ok(Response::message(StatusCode::BAD_REQUEST, UNPROCESSABLE))
    }
}

impl From<ValidationError> for Response {
    fn from(err: ValidationError) -> Self {
        Response::message(StatusCode::BAD_REQUEST, &format!("Bad Request - {err}"))
    }
}

/// Numeric pages (`4`, `4.0`, `1e1`) are truncated to an integer. Missing, non-numeric and
/// anything below 1 fall back to page 1.
fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|page| page.trim().parse::<f64>().ok())
        .filter(|page| page.is_finite() && *page >= 1.0)
        .map(|page| page.trunc() as u32)
        .unwrap_or(DEFAULT_PAGE)
}

#[derive(Debug, PartialEq, Eq)]
enum UserId {
    Valid(u64),
    /// All digits but too large to be any stored id.
    OutOfRange,
}

/// Accepts `^[0-9]+$` with a value of at least 1.
fn parse_id(raw: &str) -> Option<UserId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<u64>() {
        Ok(0) => None,
        Ok(id) => Some(UserId::Valid(id)),
        Err(_) => Some(UserId::OutOfRange),
    }
}
