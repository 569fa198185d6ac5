//! Role gate middleware.
//!
//! Must be wrapped inside [`Authenticate`](super::Authenticate) so the
//! identity is already attached. In actix the last `.wrap()` runs first,
//! so register this one before `Authenticate`:
//!
//! web::scope("/admin")
//!     .wrap(RequireRole::new("admin"))
//!     .wrap(Authenticate::new(codec))

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::auth::context::AuthContext;
use crate::auth::gate::{check_role, Rejection};

pub struct RequireRole {
    required: Rc<str>,
}

impl RequireRole {
    pub fn new(required: impl Into<String>) -> Self {
        Self {
            required: Rc::from(required.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service,
            required: Rc::clone(&self.required),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: S,
    required: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let decision = check_role(req.extensions().get::<AuthContext>(), &self.required).map(|_| ());

        match decision {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let role = req
                    .extensions()
                    .get::<AuthContext>()
                    .map(|ctx| ctx.role.clone())
                    .unwrap_or_default();
                warn!(required = %self.required, role = %role, path = %req.path(), "role check rejected");
                req.extensions_mut().insert(Rejection::from(&err));
                let res = req.into_response(err.error_response()).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
