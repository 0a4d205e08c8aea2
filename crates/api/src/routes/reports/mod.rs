use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;
use rocket_okapi::settings::OpenApiSettings;

mod fetch_report;
mod fetch_reports;
mod report_comment;
mod report_create;
mod report_like;

pub fn routes(settings: &OpenApiSettings) -> (Vec<Route>, OpenApi) {
    let (mut routes, spec) = openapi_get_routes_spec![
        settings: fetch_reports::fetch_reports,
        fetch_report::fetch_report,
        report_create::report_create,
        report_like::report_like,
        report_comment::report_comment,
    ];

    // Multipart submissions carry a file upload which okapi cannot describe.
    routes.append(&mut routes![report_create::report_create_multipart]);

    (routes, spec)
}
