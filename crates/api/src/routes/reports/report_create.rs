use haven_database::events::client::EventV1;
use haven_database::events::fanout::Fanout;
use haven_database::{Database, Report};
use haven_result::{create_error, Result};
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use validator::Validate;

/// # Report Data
#[derive(Validate, Deserialize, JsonSchema)]
pub struct DataCreateReport {
    /// Display name shown on the feed; omit to stay anonymous
    #[validate(length(min = 0, max = 64))]
    pub author_label: Option<String>,
    /// What happened
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Locality the incident occurred in
    #[validate(length(min = 1, max = 128))]
    pub region: String,
}

/// # Submit Report
///
/// Submit a new incident report to the feed.
#[openapi(tag = "Reports")]
#[post("/", data = "<data>", format = "json")]
pub async fn report_create(
    db: &State<Database>,
    fanout: &State<Fanout>,
    data: Json<DataCreateReport>,
) -> Result<Json<Report>> {
    let data = data.into_inner();
    data.validate()
        .map_err(|error| create_error!(FailedValidation {
            error: error.to_string()
        }))?;

    submit(
        db,
        fanout,
        data.author_label,
        data.description,
        data.region,
        None,
    )
    .await
}

/// Multipart form for submissions carrying an evidence attachment
#[derive(FromForm)]
pub struct DataCreateReportForm<'r> {
    pub author_label: Option<String>,
    pub description: String,
    pub region: String,
    pub evidence: Option<TempFile<'r>>,
}

/// # Submit Report (multipart)
///
/// Submit a new incident report with an optional evidence attachment.
#[post("/", data = "<data>", format = "multipart/form-data")]
pub async fn report_create_multipart(
    db: &State<Database>,
    fanout: &State<Fanout>,
    data: Form<DataCreateReportForm<'_>>,
) -> Result<Json<Report>> {
    let DataCreateReportForm {
        author_label,
        description,
        region,
        evidence,
    } = data.into_inner();

    let data = DataCreateReport {
        author_label,
        description,
        region,
    };
    data.validate()
        .map_err(|error| create_error!(FailedValidation {
            error: error.to_string()
        }))?;

    let evidence_ref = match evidence {
        Some(mut file) if file.len() > 0 => Some(store_evidence(&mut file).await?),
        _ => None,
    };

    submit(
        db,
        fanout,
        data.author_label,
        data.description,
        data.region,
        evidence_ref,
    )
    .await
}

/// Persist a submission, then fan it out to connected viewers.
async fn submit(
    db: &Database,
    fanout: &Fanout,
    author_label: Option<String>,
    description: String,
    region: String,
    evidence_ref: Option<String>,
) -> Result<Json<Report>> {
    let report = Report::create(db, author_label, description, region, evidence_ref).await?;

    // Viewers only ever see reports that are already durable; delivery
    // failures stay inside the channel and never bounce the submission.
    fanout.publish(EventV1::ReportCreate(report.clone()));

    Ok(Json(report))
}

/// Hand the uploaded file to evidence storage, returning its reference.
async fn store_evidence(file: &mut TempFile<'_>) -> Result<String> {
    let content_type = file
        .content_type()
        .map(|content_type| format!("{}/{}", content_type.top(), content_type.sub()))
        .ok_or_else(|| create_error!(FileTypeNotAllowed))?;

    let (destination, reference) = haven_files::prepare_destination(&content_type).await?;

    file.copy_to(&destination)
        .await
        .map_err(|_| create_error!(InternalError))?;

    Ok(reference)
}
