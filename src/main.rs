use std::sync::Arc;

use google_map_widget::{host::WidgetHost, net::routes, settings::ServerSettings};
use tower_http::cors::CorsLayer;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    let settings = ServerSettings::from_env()?;
    let host = WidgetHost::from_settings(&settings)?;

    let app = routes::router(Arc::new(host)).layer(CorsLayer::permissive());

    info!("Running on {}", settings.bind_address);

    axum::Server::bind(&settings.bind_address)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
