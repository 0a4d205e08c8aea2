use haven_models::v0::Coordinator;
use rocket::serde::json::Json;

/// # Fetch Coordinators
///
/// Fetch the regional coordinator contact directory.
#[openapi(tag = "Directory")]
#[get("/")]
pub async fn fetch_directory() -> Json<Vec<Coordinator>> {
    let config = haven_config::config().await;

    Json(
        config
            .directory
            .coordinators
            .into_iter()
            .map(|entry| Coordinator {
                region: entry.region,
                name: entry.name,
                phone: entry.phone,
                email: entry.email,
            })
            .collect(),
    )
}
