use haven_database::{Database, Report};
use haven_result::Result;
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Report
///
/// Fetch a single report by its id.
#[openapi(tag = "Reports")]
#[get("/<id>")]
pub async fn fetch_report(db: &State<Database>, id: &str) -> Result<Json<Report>> {
    db.fetch_report(id).await.map(Json)
}
