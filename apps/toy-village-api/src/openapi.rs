//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toy Village API",
        version = "0.1.0",
        description = "Toy marketplace catalog backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Toys", description = "Toy catalog endpoints (MongoDB)")
    )
)]
struct BaseDoc;

/// Combined document. The catalog routes live at the root, so the domain
/// document is merged rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_toys::ApiDoc::openapi());
        doc
    }
}
