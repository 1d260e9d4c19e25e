use std::net::SocketAddr;

use crate::{config::Config, error, server};

pub async fn serve(config: Config, address: Option<SocketAddr>) {
    let config = match address {
        Some(addr) => config.with_server_address(addr),
        None => config,
    };

    if let Err(e) = server::start_api_server(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
