use axum::{response::Html, Json};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

use crate::{
    auth::{
        self,
        dto::{LoginRequest, LoginResponse},
    },
    error::ErrorBody,
    siswa::{
        self,
        dto::{CreateSiswaRequest, DeleteSiswaResponse, UpdateSiswaRequest},
        pagination::PageRef,
        repo_types::Siswa,
    },
};

/// Response shape of `GET /siswa`; only used to describe it.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SiswaPage {
    next: Option<PageRef>,
    previous: Option<PageRef>,
    data: Vec<Siswa>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Siswa REST API",
        version = "1.0.0",
        description = "CRUD over student records with JWT login"
    ),
    paths(
        siswa::handlers::create_siswa,
        siswa::handlers::list_siswa,
        siswa::handlers::get_siswa,
        siswa::handlers::update_siswa,
        siswa::handlers::delete_siswa,
        auth::handlers::login,
    ),
    components(schemas(
        Siswa,
        CreateSiswaRequest,
        UpdateSiswaRequest,
        DeleteSiswaResponse,
        PageRef,
        SiswaPage,
        LoginRequest,
        LoginResponse,
        ErrorBody,
    )),
    modifiers(&BearerAuth),
    tags((name = "Siswa", description = "Student records"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Siswa REST API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/v1/api-docs/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

/// Interactive explorer over [`openapi_json`]; the UI assets load from a CDN.
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/siswa"));
        assert!(paths.contains_key("/siswa/{id}"));
        assert!(paths.contains_key("/siswa/login"));
        assert!(doc["components"]["securitySchemes"]["bearer"].is_object());

        let siswa = &doc["components"]["schemas"]["Siswa"]["properties"];
        assert!(siswa.get("name").is_some());
    }
}
