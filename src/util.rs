use url::Url;

const BOT_TOKEN: &str = "BOT_TOKEN";

pub fn get_bot_token() -> Option<String> {
    std::env::var(BOT_TOKEN).ok()
}

/// Normalize a user-supplied address into a probeable URL.
///
/// A missing scheme defaults to https. Returns `None` for anything that is
/// not an absolute http/https URL with a dotted host.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    if !host.contains('.') {
        return None;
    }

    Some(candidate)
}
