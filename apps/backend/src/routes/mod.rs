use actix_web::web;

use crate::auth::jwt::TokenCodec;
use crate::middleware::Authenticate;

pub mod health;
pub mod profile;

/// Register every route. Protected scopes are wrapped in `Authenticate`
/// keyed with `codec`.
pub fn configure(cfg: &mut web::ServiceConfig, codec: &TokenCodec) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/users")
            .wrap(Authenticate::new(codec.clone()))
            .configure(profile::configure_routes),
    );
}
