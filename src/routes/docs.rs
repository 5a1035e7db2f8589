//! OpenAPI document and Swagger UI page.

use crate::error::{MessageBody, ValidationErrors};
use crate::handlers::product;
use crate::model::{CreateProductBody, Product, ProductSummary, UpdateProductBody};
use crate::response::{ProductCreated, ProductList, ProductOne, ProductUpdated};
use crate::service::validation::{FieldError, Location};
use axum::{response::Html, routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products REST API",
        version = "1.0.0",
        description = "API Docs for products"
    ),
    paths(
        product::list,
        product::read,
        product::create,
        product::replace,
        product::toggle_availability,
        product::delete,
    ),
    components(schemas(
        Product,
        ProductSummary,
        CreateProductBody,
        UpdateProductBody,
        ProductList,
        ProductOne,
        ProductCreated,
        ProductUpdated,
        MessageBody,
        ValidationErrors,
        FieldError,
        Location,
    )),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;

const SWAGGER_UI_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Products REST API docs</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  <style>.swagger-ui .topbar { background-color: #2b3b45; }</style>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/docs/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// GET /docs (UI) and GET /docs/openapi.json.
pub fn docs_routes() -> Router {
    Router::new()
        .route("/docs", get(swagger_ui))
        .route("/docs/openapi.json", get(openapi_json))
}
