//! Request completion logging.
//!
//! Emits one `request_completed` event per request with method, path,
//! status and latency, plus what the gates decided: the caller's `user_id`
//! and `role` when `Authenticate` let the request through, or the
//! `rejection` kind when a gate turned it away. Those are read from the
//! request extensions after the inner services have run.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use super::request_trace::TraceId;
use crate::auth::context::AuthContext;
use crate::auth::gate::Rejection;

/// Gate outcome collected from a finished request.
#[derive(Debug, Default, PartialEq, Eq)]
struct GateOutcome {
    trace_id: Option<String>,
    user_id: Option<String>,
    role: Option<String>,
    rejection: Option<&'static str>,
}

impl GateOutcome {
    fn of(req: &HttpRequest) -> Self {
        let ext = req.extensions();
        let ctx = ext.get::<AuthContext>();
        Self {
            trace_id: ext.get::<TraceId>().map(ToString::to_string),
            user_id: ctx.map(|c| c.subject_id.clone()),
            role: ctx.map(|c| c.role.clone()),
            rejection: ext.get::<Rejection>().map(|r| r.0),
        }
    }
}

macro_rules! request_completed {
    ($level:expr, $method:expr, $path:expr, $status:expr, $duration_us:expr, $outcome:ident) => {
        tracing::event!(
            $level,
            http.method = %$method,
            url.path = %$path,
            http.status_code = $status,
            duration_us = $duration_us,
            trace_id = $outcome.trace_id.as_deref(),
            user_id = $outcome.user_id.as_deref(),
            role = $outcome.role.as_deref(),
            rejection = $outcome.rejection,
            message = "request_completed"
        )
    };
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let http_req = req.request().clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let outcome = GateOutcome::of(&http_req);
            let duration_us = start.elapsed().as_micros() as u64;
            let method = http_req.method();
            let path = http_req.path();
            let code = status.as_u16();

            if status.is_server_error() {
                request_completed!(Level::ERROR, method, path, code, duration_us, outcome);
            } else if status.is_client_error() {
                request_completed!(Level::WARN, method, path, code, duration_us, outcome);
            } else {
                request_completed!(Level::INFO, method, path, code, duration_us, outcome);
            }

            result
        })
    }
}
