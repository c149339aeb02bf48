//! URL validation before shelling out to the system browser.

use url::Url;

/// Validate a URL before passing it to `open::that`.
///
/// Only `http`/`https` are allowed — anything else (file, javascript,
/// custom schemes) could be a command-injection vector depending on the
/// platform handler.
pub fn validate_url_for_open(url_str: &str) -> Result<(), String> {
    let url = Url::parse(url_str).map_err(|e| format!("Invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("Refusing to open {} URL", scheme)),
    }
}
