//! Server construction and route wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, Scope, web};

use crate::inbound::http::asset_histories::{
    create_asset_history, delete_asset_history, get_asset_history, list_asset_histories,
    patch_asset_history, replace_asset_history,
};
use crate::inbound::http::assets::{
    create_asset, delete_asset, get_asset, list_assets, patch_asset, replace_asset,
};
use crate::inbound::http::employees::{
    create_employee, delete_employee, get_employee, list_employees, patch_employee,
    replace_employee,
};

/// The `/api` scope with every resource route registered.
///
/// Shared between the real server and integration tests so both exercise the
/// same routing table.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(create_employee)
        .service(list_employees)
        .service(get_employee)
        .service(replace_employee)
        .service(patch_employee)
        .service(delete_employee)
        .service(create_asset)
        .service(list_assets)
        .service(get_asset)
        .service(replace_asset)
        .service(patch_asset)
        .service(delete_asset)
        .service(create_asset_history)
        .service(list_asset_histories)
        .service(get_asset_history)
        .service(replace_asset_history)
        .service(patch_asset_history)
        .service(delete_asset_history)
}

/// Bind and start the HTTP server.
///
/// # Errors
/// Returns [`std::io::Error`] when the listener cannot bind.
pub fn run(config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state());
    let server = HttpServer::new(move || {
        let app = App::new().app_data(state.clone()).service(api_scope());
        #[cfg(debug_assertions)]
        let app = app.route(
            "/api-docs/openapi.json",
            web::get().to(|| async {
                use utoipa::OpenApi;
                actix_web::HttpResponse::Ok().json(crate::ApiDoc::openapi())
            }),
        );
        app
    })
    .bind((config.host.as_str(), config.port))?
    .run();
    tracing::info!(host = %config.host, port = config.port, "asset registry listening");
    Ok(server)
}
