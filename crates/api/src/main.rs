#[macro_use]
extern crate rocket;
#[macro_use]
extern crate rocket_okapi;
#[macro_use]
extern crate schemars;
#[macro_use]
extern crate log;

pub mod routes;
pub mod websocket;

use haven_database::events::fanout::Fanout;
use haven_database::{Database, DatabaseInfo};
use rocket::{Build, Rocket};
use rocket_cors::AllowedOrigins;
use std::str::FromStr;

#[rocket::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));

    info!(
        "Starting Haven server [version {}].",
        env!("CARGO_PKG_VERSION")
    );

    // Setup database
    let db = DatabaseInfo::Auto
        .connect()
        .await
        .expect("Database connection failed.");

    // Live feed channel, shared between the API and the WebSocket server
    let fanout = Fanout::default();

    // Serve live events to viewers alongside the HTTP API.
    tokio::task::spawn(websocket::launch(fanout.clone()));

    build(db, fanout)
        .launch()
        .await
        .expect("Rocket launch failed.");
}

/// Configure the Rocket application
pub fn build(db: Database, fanout: Fanout) -> Rocket<Build> {
    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: ["Get", "Put", "Post", "Delete", "Options", "Head", "Patch"]
            .iter()
            .map(|s| FromStr::from_str(s).unwrap())
            .collect(),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to create CORS.");

    let rocket = rocket::build();
    routes::mount(rocket)
        .mount("/", rocket_cors::catch_all_options_routes())
        .mount(
            "/swagger/",
            rocket_okapi::swagger_ui::make_swagger_ui(&rocket_okapi::swagger_ui::SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .manage(db)
        .manage(fanout)
        .manage(cors.clone())
        .attach(cors)
}
