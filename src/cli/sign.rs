use tabled::Table;

use crate::{
    config::Config,
    info,
    params::{API_KEY, API_SIG, ParamSet},
    types::ParamTableRow,
};

/// Prints how a parameter set would be signed.
///
/// The configured API key is injected exactly like the proxy does, a supplied
/// `api_sig` is dropped, and the signature is computed even for methods the
/// proxy would send unsigned. The secret is masked in the printed base string.
pub fn sign(config: &Config, pairs: Vec<(String, String)>, secret: Option<String>) {
    let secret = secret.unwrap_or_else(|| config.api_secret.clone());

    let mut params: ParamSet = pairs.into_iter().collect();
    params.remove(API_SIG);
    params.set(API_KEY, config.api_key.as_str());

    let rows: Vec<ParamTableRow> = params
        .iter()
        .map(|(name, value)| ParamTableRow {
            name: name.to_string(),
            value: value.to_string(),
            signed: if ParamSet::is_signed_key(name) {
                "yes".to_string()
            } else {
                "no".to_string()
            },
        })
        .collect();
    println!("{}", Table::new(rows));

    let base = params.signature_base(&secret);
    let visible = &base[..base.len() - secret.len()];
    println!("base:    {}{}", visible, "*".repeat(secret.len()));

    let signature = params.sign(&secret);
    println!("api_sig: {}", signature);

    if params.intent().is_signed() {
        info!("The proxy sends this method as a signed POST.");
    } else {
        info!("The proxy sends this method as an unsigned GET without api_sig.");
    }
}
