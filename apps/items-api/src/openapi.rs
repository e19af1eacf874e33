use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Items API",
        version = "0.1.0",
        description = "Item CRUD and concurrent batch processing"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/items", api = domain_items::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_nests_item_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/items/process"));
        assert!(doc.paths.paths.contains_key("/items/{id}"));
    }
}
