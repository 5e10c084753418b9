use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Veiculos API",
        version = "1.0.0",
        description = "Vehicle records and administrator accounts with JWT role-based access."
    ),
    paths(
        crate::api::home,
        crate::auth::login,
        crate::auth::list_administrators,
        crate::auth::get_administrator,
        crate::auth::create_administrator,
        crate::vehicles::list_vehicles,
        crate::vehicles::get_vehicle,
        crate::vehicles::create_vehicle,
        crate::vehicles::update_vehicle,
        crate::vehicles::delete_vehicle,
    ),
    components(schemas(
        crate::api::HomeResponse,
        crate::auth::LoginRequest,
        crate::auth::LoginResponse,
        crate::auth::AdministratorRequest,
        crate::auth::AdministratorView,
        crate::models::Role,
        crate::models::Vehicle,
        crate::vehicles::VehicleRequest,
        crate::error::ValidationErrorBody,
    )),
    tags(
        (name = "Home", description = "Entry point"),
        (name = "Administradores", description = "Administrator accounts and login"),
        (name = "Veiculos", description = "Vehicle records"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer JWT security scheme to the OpenAPI document.
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
                        .description(Some(
                            "Token returned by POST /administradores/login.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in [
            "/",
            "/administradores/login",
            "/administradores",
            "/administradores/{id}",
            "/veiculos",
            "/veiculos/{id}",
        ] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }

        assert!(doc["paths"]["/veiculos/{id}"]["delete"].is_object());
        assert!(doc["paths"]["/administradores"]["get"]["security"].is_array());
    }

    #[test]
    fn test_bearer_scheme_declared() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let scheme = &doc["components"]["securitySchemes"]["bearer"];
        assert_eq!(scheme["scheme"], "bearer");
        assert_eq!(scheme["bearerFormat"], "JWT");
    }
}
