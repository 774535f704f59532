use crate::error::AppError;

fn is_loopback_authority(authority: &str) -> bool {
    let Some(rest) = authority.strip_prefix("127.0.0.1") else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    match rest.strip_prefix(':') {
        Some(port) => port.parse::<u16>().map(|p| p != 0).unwrap_or(false),
        None => false,
    }
}

/// Normalize and check an API base URL, returning it without a trailing slash.
///
/// HTTPS is required for any host; plain HTTP is only allowed for `127.0.0.1[:port]` test
/// servers. The authority must be non-empty and carry no userinfo. `code` is used for errors.
pub fn validate_base_url(base_url: &str, code: &str) -> Result<String, AppError> {
    let base_url = base_url.trim_end_matches('/').to_string();
    let invalid = |message: &str| {
        AppError::new(code, message.to_string()).with_details(format!("base_url={base_url}"))
    };

    let (https, rest) = if let Some(rest) = base_url.strip_prefix("https://") {
        (true, rest)
    } else if let Some(rest) = base_url.strip_prefix("http://") {
        (false, rest)
    } else {
        return Err(invalid("Base URL must use https"));
    };

    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() || authority.contains('@') {
        return Err(invalid("Base URL must name a host without credentials"));
    }
    if !https && !is_loopback_authority(authority) {
        return Err(invalid("Base URL must use https"));
    }
    Ok(base_url)
}

/// True when the URL has nothing after its authority.
pub fn is_host_root(base_url: &str) -> bool {
    base_url
        .split_once("://")
        .map(|(_, rest)| !rest.contains('/'))
        .unwrap_or(false)
}
