use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Turnstile API",
        version = "0.1.0",
        description = "User signup, login, and token-gated route access."
    ),
    paths(
        crate::routes::signup,
        crate::routes::login,
        crate::routes::protected,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::CredentialsRequest,
        crate::dto::UserResponse,
        crate::dto::TokenResponse,
        crate::dto::ProtectedResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Signup, login, and protected access"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token returned by POST /login."))
                        .build(),
                ),
            );
        }
    }
}
