use actix_web::{web, HttpResponse};

use crate::auth::context::AuthContext;
use crate::error::AppError;

/// Identity of the authenticated caller.
async fn profile(auth: AuthContext) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(auth))
}

/// Routes under `/users`. Callers must wrap the scope in `Authenticate`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(profile));
}
