use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::context::AuthContext;
use crate::error::AppError;

/// Hands the identity stored by the `Authenticate` middleware to a handler.
///
/// A handler mounted without `Authenticate` sees `MissingCredential`.
impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or(AppError::MissingCredential),
        )
    }
}
