/// Builds the Last.fm web authentication URL a browser is sent to.
///
/// The result has the form `<auth_url>?api_key=<KEY>&cb=<callback>`. The
/// callback is inserted verbatim, without percent-encoding, so the caller
/// controls exactly what Last.fm redirects back to.
///
/// # Example
///
/// ```
/// let url = login_url("https://www.last.fm/api/auth/", "K123", "https://x.test");
/// assert_eq!(url, "https://www.last.fm/api/auth/?api_key=K123&cb=https://x.test");
/// ```
pub fn login_url(auth_url: &str, api_key: &str, callback: &str) -> String {
    format!(
        "{auth_url}?api_key={api_key}&cb={callback}",
        auth_url = auth_url,
        api_key = api_key,
        callback = callback
    )
}
