//! Block Response
//!
//! HTTP-shaped output of a block render: status, content type, cache
//! directives and body.

use axum::{
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript";

// == Block Response ==
#[derive(Debug, Clone, PartialEq)]
pub struct BlockResponse {
    status: StatusCode,
    content_type: String,
    body: String,
    private: bool,
    max_age: Option<u64>,
}

impl BlockResponse {
    /// A 200 HTML response with no cache directives.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: HTML_CONTENT_TYPE.to_string(),
            body: body.into(),
            private: false,
            max_age: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
    }

    // == Cache Directives ==
    /// Forbids shared caches from storing this response.
    pub fn set_private(&mut self) {
        self.private = true;
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn set_max_age(&mut self, seconds: u64) {
        self.max_age = Some(seconds);
    }

    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    /// Value of the `Cache-Control` header, if any directive is set.
    pub fn cache_control(&self) -> Option<String> {
        let mut directives = Vec::new();
        if self.private {
            directives.push("private".to_string());
        }
        if let Some(max_age) = self.max_age {
            directives.push(format!("max-age={max_age}"));
        }
        if directives.is_empty() {
            None
        } else {
            Some(directives.join(", "))
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for BlockResponse {
    fn into_response(self) -> Response {
        let cache_control = self.cache_control();
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();

        if let Ok(value) = HeaderValue::from_str(&self.content_type) {
            headers.insert(CONTENT_TYPE, value);
        }
        if let Some(value) = cache_control.and_then(|v| HeaderValue::from_str(&v).ok()) {
            headers.insert(CACHE_CONTROL, value);
        }

        response
    }
}
