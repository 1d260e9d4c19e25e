use crate::{config::Config, lastfm, success, warning};

/// Prints the Last.fm web authentication URL for `callback`.
///
/// With `open` set, the URL is also launched in the default browser. A browser
/// that cannot be started only produces a warning; the URL is printed either way.
pub fn login_url(config: &Config, callback: &str, open: bool) {
    let auth_url = lastfm::login_url(&config.auth_url, &config.api_key, callback);
    println!("{}", auth_url);

    if !open {
        return;
    }

    match webbrowser::open(&auth_url) {
        Ok(()) => success!("Opened Last.fm authorization page."),
        Err(e) => warning!(
            "Failed to open browser ({}). Please navigate to the URL above manually.",
            e
        ),
    }
}
