//! Bearer token authentication middleware
//!
//! Verifies the `Authorization: Bearer <token>` header and stores the
//! resulting [`AuthContext`] in request extensions before calling the
//! wrapped service. Rejected requests never reach the wrapped service; the
//! middleware writes the 401 response itself.

use std::future::{ready, Ready};
use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::auth::gate::{authenticate, Rejection};
use crate::auth::jwt::TokenCodec;
use crate::error::AppError;

pub struct Authenticate {
    codec: TokenCodec,
}

impl Authenticate {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service,
            codec: self.codec.clone(),
        }))
    }
}

pub struct AuthenticateMiddleware<S> {
    service: S,
    codec: TokenCodec,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str())
            .transpose()
        {
            Ok(raw) => authenticate(&self.codec, raw, SystemTime::now()),
            Err(_) => Err(AppError::MalformedCredential),
        };

        match outcome {
            Ok(ctx) => {
                debug!(user_id = %ctx.subject_id, role = %ctx.role, "request authenticated");
                req.extensions_mut().insert(ctx);

                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                warn!(reason = %err, path = %req.path(), "authentication rejected");
                req.extensions_mut().insert(Rejection::from(&err));
                let res = req.into_response(err.error_response()).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
