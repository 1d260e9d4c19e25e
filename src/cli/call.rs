use std::{collections::HashMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Config, proxy::SigningProxy, success, types::InboundRequest, warning};

/// Sends one request through the signing proxy pipeline and prints the reply.
///
/// The pairs are treated like a GET query string, so `action=getLoginUrl`
/// works here too. The printed JSON is exactly what a browser would receive.
pub async fn call(config: Config, pairs: Vec<(String, String)>) {
    let query: HashMap<String, String> = pairs.into_iter().collect();
    let proxy = SigningProxy::new(config);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Calling Last.fm...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let response = proxy.handle(InboundRequest::get(query)).await;
    pb.finish_and_clear();

    match serde_json::to_string_pretty(&response.body) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", response.body),
    }

    if response.status.is_success() {
        success!("Answered with status {}.", response.status.as_u16());
    } else {
        warning!("Request failed with status {}.", response.status.as_u16());
    }
}
