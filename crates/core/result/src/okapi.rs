use rocket_okapi::okapi::openapi3;
use rocket_okapi::{gen::OpenApiGenerator, response::OpenApiResponderInner, OpenApiError};

use crate::{EmptyResponse, Error};

impl OpenApiResponderInner for Error {
    fn responses(
        gen: &mut OpenApiGenerator,
    ) -> std::result::Result<openapi3::Responses, OpenApiError> {
        let mut content = rocket_okapi::okapi::Map::new();
        content.insert(
            "application/json".to_string(),
            openapi3::MediaType {
                schema: Some(gen.json_schema::<Error>()),
                ..Default::default()
            },
        );

        Ok(openapi3::Responses {
            default: Some(openapi3::RefOr::Object(openapi3::Response {
                content,
                description: "An error occurred.".to_string(),
                ..Default::default()
            })),
            ..Default::default()
        })
    }
}

impl OpenApiResponderInner for EmptyResponse {
    fn responses(
        _gen: &mut OpenApiGenerator,
    ) -> std::result::Result<openapi3::Responses, OpenApiError> {
        let mut responses = openapi3::Responses::default();
        responses.responses.insert(
            "204".to_string(),
            openapi3::RefOr::Object(openapi3::Response {
                description: "Success".to_string(),
                ..Default::default()
            }),
        );

        Ok(responses)
    }
}
