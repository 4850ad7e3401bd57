use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Builds the CORS layer from a comma separated origin list.
///
/// `None` allows any origin, which is only meant for local development.
pub fn cors_layer(allowed_origins: Option<&str>) -> io::Result<CorsLayer> {
    let Some(raw) = allowed_origins else {
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(CorsLayer::permissive());
    };

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<HeaderValue>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!(origins = raw, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_list_is_accepted() {
        assert!(cors_layer(Some("http://localhost:3000, https://shop.example.com")).is_ok());
    }

    #[test]
    fn test_only_separators_is_rejected() {
        let err = cors_layer(Some(" , ,")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_origin_is_permissive() {
        assert!(cors_layer(None).is_ok());
    }
}
