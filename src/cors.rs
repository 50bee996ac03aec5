use crate::config::Cors;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Header values stamped onto every response.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub allow_origin: HeaderValue,
    pub allow_methods: HeaderValue,
    pub allow_headers: HeaderValue,
    pub max_age: HeaderValue,
}

impl CorsPolicy {
    pub fn from_config(cfg: &Cors) -> anyhow::Result<Self> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(&cfg.allow_origin)?,
            allow_methods: HeaderValue::from_str(&cfg.allow_methods)?,
            allow_headers: HeaderValue::from_str(&cfg.allow_headers)?,
            max_age: HeaderValue::from(cfg.max_age_s),
        })
    }

    /// Wraps `router` so preflights short-circuit and every response,
    /// including fallbacks and errors, carries the CORS headers.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            .layer(middleware::from_fn(preflight))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                self.allow_origin.clone(),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                self.allow_methods.clone(),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                self.allow_headers.clone(),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_MAX_AGE,
                self.max_age.clone(),
            ))
    }
}

async fn preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}
