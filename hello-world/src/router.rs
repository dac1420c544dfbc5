//! HTTP routing for API Gateway proxy requests.
//!
//! Matching is deliberately loose: any path *containing* `/user` goes to the user handler, so
//! `/users123` and `/v1/user/x` route there as well.

use http::StatusCode;

use crate::event::HttpRequest;
use crate::handlers::{hello, UserHandler};
use crate::response::Response;

pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";

/// Where a request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Hello,
    Users,
    NotFound,
}

impl Route {
    pub fn resolve(method: &str, path: &str) -> Self {
        if method == "GET" && path == "/hello" {
            return Self::Hello;
        }
        // "/users" contains "/user"; both spellings land here.
        if path.contains("/user") {
            return Self::Users;
        }
        Self::NotFound
    }
}

#[derive(Clone, Default)]
pub struct Router {
    users: UserHandler,
}

impl Router {
    pub fn new(users: UserHandler) -> Self {
        Self { users }
    }

    pub async fn route(&self, request: &HttpRequest) -> Response {
        let route = Route::resolve(&request.http_method, &request.path);
        tracing::debug!(
            http_method = %request.http_method,
            path = %request.path,
            ?route,
            "routing request"
        );

        match route {
            Route::Hello => hello::handle(request),
            Route::Users => self.users.handle(request).await,
            Route::NotFound => Response::message(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND),
        }
    }
}
