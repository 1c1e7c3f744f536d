//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::build_prometheus;
pub use settings::ServerSettings;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use complaint_backend::Trace;
#[cfg(debug_assertions)]
use complaint_backend::doc::ApiDoc;
use complaint_backend::inbound::http::complaints::complaint_routes;
use complaint_backend::inbound::http::error::{json_error_handler, query_error_handler};
use complaint_backend::inbound::http::health::{HealthState, live, ready};
use complaint_backend::inbound::http::login::login;
use complaint_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let routes = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(login)
        .service(complaint_routes())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        routes.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }
    #[cfg(not(debug_assertions))]
    {
        routes
    }
}

/// Construct an Actix HTTP server from the prepared configuration.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// flips once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when wiring the stores or binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        {
            app.wrap(metrics_layer.clone())
        }
        #[cfg(not(feature = "metrics"))]
        {
            app
        }
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
