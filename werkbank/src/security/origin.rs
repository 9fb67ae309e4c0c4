use axum::{
    extract::Request,
    http::{header, uri::Authority, HeaderMap},
    middleware::Next,
    response::Response,
};
use url::Url;

use crate::routes::ApiError;

/// The `host[:port]` part of an absolute URL exactly as written, or `None`
/// when the URL cannot be parsed. A default port that is spelled out stays
/// part of the result.
fn authority(raw: &str) -> Option<&str> {
    Url::parse(raw).ok()?.host_str()?;

    let (_, rest) = raw.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    Some(authority.rsplit_once('@').map_or(authority, |(_, host)| host))
}

/// Whether the `Origin` and `Referer` headers agree with the request's own
/// host. The host comes from the `Host` header, or from the request target
/// when that header is absent (HTTP/2). Absent or unparseable headers do not
/// count against the request.
fn is_same_origin(headers: &HeaderMap, target_authority: Option<&str>) -> bool {
    let Some(host) = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or(target_authority)
        .filter(|host| !host.is_empty())
    else {
        return true;
    };

    [header::ORIGIN, header::REFERER]
        .iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(authority)
        .all(|source| source == host)
}

/// Rejects state-changing requests that originate from another site.
pub async fn require_same_origin(request: Request, next: Next) -> Result<Response, ApiError> {
    let target_authority = request.uri().authority().map(Authority::as_str);
    if !request.method().is_safe() && !is_same_origin(request.headers(), target_authority) {
        tracing::warn!(
            method = %request.method(),
            host = ?request.headers().get(header::HOST),
            target = ?target_authority,
            origin = ?request.headers().get(header::ORIGIN),
            referer = ?request.headers().get(header::REFERER),
            "Rejected cross-origin request"
        );
        return Err(ApiError::invalid_origin());
    }

    Ok(next.run(request).await)
}
