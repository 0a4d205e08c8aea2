use rocket::serde::json::Json;
use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;
use rocket_okapi::settings::OpenApiSettings;
use serde::Serialize;

pub fn routes(settings: &OpenApiSettings) -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![settings: root]
}

/// # Node Configuration
#[derive(Serialize, JsonSchema, Debug)]
pub struct NodeConfig {
    /// Haven API version
    pub haven: String,
    /// WebSocket host serving the live feed
    pub ws: String,
}

/// # Query Node
///
/// Fetch the configuration for this Haven node.
#[openapi(tag = "Core")]
#[get("/")]
pub async fn root() -> Json<NodeConfig> {
    let config = haven_config::config().await;

    Json(NodeConfig {
        haven: env!("CARGO_PKG_VERSION").to_string(),
        ws: config.api.ws,
    })
}
