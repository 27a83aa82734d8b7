use log::*;
use service::AppState;
use tokio::net::TcpListener;

mod controller;
mod error;
pub mod response;
mod router;

pub use self::error::{Error, Result};
pub use router::define_routes;

/// Binds the configured address and serves the router until the process exits.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let server_url = app_state.config.socket_addr();
    let listener = TcpListener::bind(&server_url).await?;

    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, define_routes(app_state)).await
}
