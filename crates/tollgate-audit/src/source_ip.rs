//! Client address extraction.

use http::{HeaderMap, HeaderName};
use std::net::IpAddr;

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Client addresses of a request, most specific first.
///
/// Order: every parsable `X-Forwarded-For` entry as listed (the originating
/// client comes first), then `X-Real-Ip`, then the connection peer. An
/// address already in the list is not repeated.
pub fn source_ips(headers: &HeaderMap, remote_addr: Option<IpAddr>) -> Vec<IpAddr> {
    let mut ips = Vec::new();
    let mut push = |ip: IpAddr| {
        if !ips.contains(&ip) {
            ips.push(ip);
        }
    };

    for value in headers.get_all(&X_FORWARDED_FOR) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        value
            .split(',')
            .filter_map(|entry| entry.trim().parse::<IpAddr>().ok())
            .for_each(&mut push);
    }

    if let Some(ip) = headers
        .get(&X_REAL_IP)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<IpAddr>().ok())
    {
        push(ip);
    }

    if let Some(ip) = remote_addr {
        push(ip);
    }

    ips
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn connection_address_only() {
        let ips = source_ips(&HeaderMap::new(), Some(ip("192.0.2.7")));
        assert_eq!(ips, vec![ip("192.0.2.7")]);
    }

    #[test]
    fn no_sources_is_empty() {
        assert!(source_ips(&HeaderMap::new(), None).is_empty());
    }

    #[test]
    fn proxy_chain_comes_before_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.2"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.3"));

        let ips = source_ips(&headers, Some(ip("10.0.0.4")));
        assert_eq!(
            ips,
            vec![
                ip("203.0.113.9"),
                ip("10.0.0.2"),
                ip("10.0.0.3"),
                ip("10.0.0.4")
            ]
        );
    }

    #[test]
    fn repeated_headers_and_duplicates() {
        let mut headers = HeaderMap::new();
        headers.append("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        headers.append("x-forwarded-for", HeaderValue::from_static("2001:db8::1, 10.0.0.2"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        let ips = source_ips(&headers, Some(ip("203.0.113.9")));
        assert_eq!(
            ips,
            vec![ip("203.0.113.9"), ip("2001:db8::1"), ip("10.0.0.2")]
        );
    }

    #[test]
    fn garbage_entries_are_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("unknown, , 198.51.100.1:8080, 198.51.100.2"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("not-an-ip"));

        let ips = source_ips(&headers, None);
        assert_eq!(ips, vec![ip("198.51.100.2")]);
    }
}
