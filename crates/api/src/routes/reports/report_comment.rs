use haven_database::{Database, Report};
use haven_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use validator::Validate;

/// # Comment Data
#[derive(Validate, Deserialize, JsonSchema)]
pub struct DataCreateComment {
    /// Display name of the commenter
    #[validate(length(min = 1, max = 64))]
    pub author_label: String,
    /// Comment text
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    /// Whether this comment comes from an official partner
    pub is_official: Option<bool>,
}

/// # Comment on Report
///
/// Append a comment to the given report.
#[openapi(tag = "Interactions")]
#[put("/<id>/comment", data = "<data>")]
pub async fn report_comment(
    db: &State<Database>,
    id: &str,
    data: Json<DataCreateComment>,
) -> Result<Json<Report>> {
    let data = data.into_inner();
    data.validate()
        .map_err(|error| create_error!(FailedValidation {
            error: error.to_string()
        }))?;

    Report::comment(
        db,
        id,
        data.author_label,
        data.text,
        data.is_official.unwrap_or_default(),
    )
    .await
    .map(Json)
}
