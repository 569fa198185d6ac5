use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error, HttpResponse};
use actix_http::Request;
use pm_backend::middleware::{Authenticate, RequestTrace, RequireRole, StructuredLogger};
use pm_backend::{routes, AuthContext, Role, TokenCodec};

/// Handler that echoes the identity attached by `Authenticate`.
pub async fn echo_identity(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth)
}

/// Test service with the production routes plus:
/// - `/gated/any`: `Authenticate` only
/// - `/gated/{role}`: `Authenticate` then `RequireRole(role)` for each known role
/// - `/unguarded/role/developer`: `RequireRole("developer")` with no `Authenticate`
pub async fn build_test_app(
    codec: TokenCodec,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .configure(|cfg| routes::configure(cfg, &codec))
            .service(
                web::scope("/gated")
                    .wrap(Authenticate::new(codec.clone()))
                    .route("/any", web::get().to(echo_identity))
                    .service(
                        web::resource("/admin")
                            .wrap(RequireRole::new(Role::Admin))
                            .route(web::get().to(echo_identity)),
                    )
                    .service(
                        web::resource("/developer")
                            .wrap(RequireRole::new(Role::Developer))
                            .route(web::get().to(echo_identity)),
                    )
                    .service(
                        web::resource("/project_manager")
                            .wrap(RequireRole::new(Role::ProjectManager))
                            .route(web::get().to(echo_identity)),
                    ),
            )
            .service(
                web::resource("/unguarded/role/developer")
                    .wrap(RequireRole::new(Role::Developer))
                    .route(web::get().to(echo_identity)),
            ),
    )
    .await
}
