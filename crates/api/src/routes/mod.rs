use rocket::{Build, Rocket};
use rocket_okapi::okapi::openapi3::{Info, OpenApi};
use rocket_okapi::settings::OpenApiSettings;

mod coordinators;
mod reports;
mod root;

pub fn mount(mut rocket: Rocket<Build>) -> Rocket<Build> {
    let settings = OpenApiSettings::default();

    mount_endpoints_and_merged_docs! {
        rocket, "/".to_owned(), settings,
        "/" => (vec![], custom_openapi_spec()),
        "" => root::routes(&settings),
        "/reports" => reports::routes(&settings),
        "/coordinators" => coordinators::routes(&settings)
    };

    rocket
}

fn custom_openapi_spec() -> OpenApi {
    OpenApi {
        openapi: OpenApi::default_version(),
        info: Info {
            title: "Haven API".to_owned(),
            description: Some("Anonymous incident reporting platform.".to_owned()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use haven_database::events::client::EventV1;
    use haven_database::events::fanout::Fanout;
    use haven_database::{DatabaseInfo, Report, ANONYMOUS_AUTHOR};
    use haven_models::v0::{Coordinator, ReportStatus};
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;

    async fn test_client(fanout: Fanout) -> Client {
        let db = DatabaseInfo::Reference.connect().await.unwrap();
        Client::tracked(crate::build(db, fanout)).await.unwrap()
    }

    #[rocket::async_test]
    async fn submit_report_and_fetch_feed() {
        let client = test_client(Fanout::default()).await;

        let response = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"description": "test", "region": "Nairobi"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let report: Report = response.into_json().await.unwrap();
        assert_eq!(report.author_label, ANONYMOUS_AUTHOR);
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.likes, 0);
        assert!(report.comments.is_empty());

        let response = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"author_label": "Wanjiku_K", "description": "second", "region": "Mombasa"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let feed: Vec<Report> = client
            .get("/reports")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].author_label, "Wanjiku_K");
        assert_eq!(feed[1].id, report.id);
    }

    #[rocket::async_test]
    async fn submitting_publishes_to_connected_viewers() {
        let fanout = Fanout::default();
        let mut subscription = fanout.subscribe();
        let client = test_client(fanout.clone()).await;

        let response = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"description": "test", "region": "Nairobi"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let report: Report = response.into_json().await.unwrap();

        // The subscriber sees the same persisted record the submitter got back.
        match subscription.rx.try_next() {
            Ok(Some(EventV1::ReportCreate(event))) => assert_eq!(event, report),
            _ => panic!("expected a ReportCreate event"),
        }

        // A viewer connecting now missed that event.
        let mut late = fanout.subscribe();
        assert!(late.rx.try_next().is_err());

        // Rejected submissions publish nothing.
        let response = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"description": "", "region": "Nairobi"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert!(subscription.rx.try_next().is_err());
        assert!(late.rx.try_next().is_err());
    }

    #[rocket::async_test]
    async fn rejected_submission_is_not_persisted() {
        let client = test_client(Fanout::default()).await;

        for body in [
            r#"{"description": "", "region": "Nairobi"}"#,
            r#"{"description": "test", "region": ""}"#,
            r#"{"region": "Nairobi"}"#,
        ] {
            let response = client
                .post("/reports")
                .header(ContentType::JSON)
                .body(body)
                .dispatch()
                .await;
            assert_ne!(response.status(), Status::Ok);
        }

        let feed: Vec<Report> = client
            .get("/reports")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert!(feed.is_empty());
    }

    #[rocket::async_test]
    async fn like_report() {
        let client = test_client(Fanout::default()).await;

        let report: Report = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"description": "test", "region": "Kisumu"}"#)
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        for _ in 0..2 {
            let response = client
                .put(format!("/reports/{}/like", report.id))
                .dispatch()
                .await;
            assert_eq!(response.status(), Status::NoContent);
        }

        let report: Report = client
            .get(format!("/reports/{}", report.id))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(report.likes, 2);

        let response = client
            .put("/reports/01JUNKJUNKJUNKJUNKJUNKJUNK/like")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn comment_on_report() {
        let client = test_client(Fanout::default()).await;

        let report: Report = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"description": "test", "region": "Eldoret"}"#)
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        let response = client
            .put(format!("/reports/{}/comment", report.id))
            .header(ContentType::JSON)
            .body(r#"{"author_label": "Omondi_J", "text": "I was there."}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let updated: Report = response.into_json().await.unwrap();
        assert_eq!(updated.comments.len(), 1);
        assert_eq!(updated.comments[0].author_label, "Omondi_J");
        assert!(!updated.comments[0].is_official);

        let response = client
            .put(format!("/reports/{}/comment", report.id))
            .header(ContentType::JSON)
            .body(r#"{"author_label": "Kenya Police", "text": "Case file opened.", "is_official": true}"#)
            .dispatch()
            .await;
        let updated: Report = response.into_json().await.unwrap();
        assert_eq!(updated.comments.len(), 2);
        assert!(updated.comments[1].is_official);

        let response = client
            .put(format!("/reports/{}/comment", report.id))
            .header(ContentType::JSON)
            .body(r#"{"author_label": "Omondi_J", "text": ""}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let response = client
            .put("/reports/01JUNKJUNKJUNKJUNKJUNKJUNK/comment")
            .header(ContentType::JSON)
            .body(r#"{"author_label": "Omondi_J", "text": "hello"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn fetch_report_is_idempotent() {
        let client = test_client(Fanout::default()).await;

        let report: Report = client
            .post("/reports")
            .header(ContentType::JSON)
            .body(r#"{"description": "test", "region": "Nyeri"}"#)
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        let first: Report = client
            .get(format!("/reports/{}", report.id))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        let second: Report = client
            .get(format!("/reports/{}", report.id))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(first, second);

        let response = client
            .get("/reports/01JUNKJUNKJUNKJUNKJUNKJUNK")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn multipart_submission_stores_evidence() {
        let client = test_client(Fanout::default()).await;

        let body = concat!(
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"author_label\"\r\n\r\n",
            "Chebet_R\r\n",
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"description\"\r\n\r\n",
            "test\r\n",
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"region\"\r\n\r\n",
            "Nairobi\r\n",
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"evidence\"; filename=\"evidence.png\"\r\n",
            "Content-Type: image/png\r\n\r\n",
            "not a real png\r\n",
            "--X-BOUNDARY--\r\n",
        );

        let response = client
            .post("/reports")
            .header(ContentType::parse_flexible("multipart/form-data; boundary=X-BOUNDARY").unwrap())
            .body(body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let report: Report = response.into_json().await.unwrap();
        assert_eq!(report.author_label, "Chebet_R");

        let reference = report.evidence_ref.expect("evidence reference");
        assert!(reference.ends_with(".png"));
        assert!(!reference.contains('\\'));

        // The reference round-trips unchanged through the store.
        let fetched: Report = client
            .get(format!("/reports/{}", report.id))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(fetched.evidence_ref, Some(reference));
    }

    #[rocket::async_test]
    async fn multipart_submission_rejects_disallowed_evidence() {
        let client = test_client(Fanout::default()).await;

        let body = concat!(
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"description\"\r\n\r\n",
            "test\r\n",
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"region\"\r\n\r\n",
            "Nairobi\r\n",
            "--X-BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"evidence\"; filename=\"notes.txt\"\r\n",
            "Content-Type: text/plain\r\n\r\n",
            "some notes\r\n",
            "--X-BOUNDARY--\r\n",
        );

        let response = client
            .post("/reports")
            .header(ContentType::parse_flexible("multipart/form-data; boundary=X-BOUNDARY").unwrap())
            .body(body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let feed: Vec<Report> = client
            .get("/reports")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert!(feed.is_empty());
    }

    #[rocket::async_test]
    async fn fetch_coordinator_directory() {
        let client = test_client(Fanout::default()).await;

        let response = client.get("/coordinators").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let directory: Vec<Coordinator> = response.into_json().await.unwrap();
        assert!(!directory.is_empty());
        assert!(directory.iter().any(|entry| entry.region == "Nairobi"));
    }

    #[rocket::async_test]
    async fn query_node_configuration() {
        let client = test_client(Fanout::default()).await;

        let response = client.get("/").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body = response.into_string().await.unwrap();
        assert!(body.contains("ws"));
    }
}
