use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{any, get},
};
use tokio::net::TcpListener;

use crate::{Res, api, config::Config, info, proxy::SigningProxy};

/// Path browsers call the proxy on.
pub const PROXY_PATH: &str = "/lastfm-proxy";

/// Path of the serverless deployment this proxy replaces, kept so existing
/// front-ends work unchanged.
pub const FUNCTION_PATH: &str = "/.netlify/functions/lastfm-proxy";

pub fn router(proxy: SigningProxy) -> Router {
    let state = Arc::new(proxy);

    Router::new()
        .route("/health", get(api::health))
        .route(PROXY_PATH, any(api::proxy))
        .route(FUNCTION_PATH, any(api::proxy))
        .with_state(state)
}

/// Binds `config.server_address` and serves the proxy until the process ends.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.server_address;
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, config).await
}

/// Serves the proxy on an already bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Res<()> {
    let addr: SocketAddr = listener.local_addr()?;
    info!("Forwarding to {}", config.api_url);
    info!("Listening on http://{}{}", addr, PROXY_PATH);

    let app = router(SigningProxy::new(config));
    axum::serve(listener, app).await?;
    Ok(())
}
