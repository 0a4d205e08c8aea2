use haven_database::{Database, Report};
use haven_result::Result;
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Reports
///
/// Fetch all reports on the feed, newest first.
#[openapi(tag = "Reports")]
#[get("/")]
pub async fn fetch_reports(db: &State<Database>) -> Result<Json<Vec<Report>>> {
    db.fetch_reports().await.map(Json)
}
