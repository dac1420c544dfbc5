use http::StatusCode;

use crate::event::HttpRequest;
use crate::response::Response;

pub const GREETING: &str = "Hello from Lambda!";

/// `GET /hello`. The request is not inspected.
pub fn handle(_request: &HttpRequest) -> Response {
    Response::message(StatusCode::OK, GREETING)
}
