use crate::routes::health;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
///
/// Course and assignment paths are added by the router.
#[derive(OpenApi)]
#[openapi(
    paths(health::root, health::health),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Courses", description = "Courses and Canvas export imports"),
        (name = "Assignments", description = "Assignments and pasted assignment text"),
    ),
    info(
        title = "Canvas Import API",
        version = "1.0.0",
        description = "Imports Canvas LMS course exports and pasted assignment lists",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
