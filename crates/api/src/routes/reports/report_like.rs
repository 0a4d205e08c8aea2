use haven_database::Database;
use haven_result::{EmptyResponse, Result};
use rocket::State;

/// # Like Report
///
/// Add a like to the given report.
#[openapi(tag = "Interactions")]
#[put("/<id>/like")]
pub async fn report_like(db: &State<Database>, id: &str) -> Result<EmptyResponse> {
    db.like_report(id).await.map(|_| EmptyResponse)
}
