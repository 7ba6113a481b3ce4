//! Country resolution
//!
//! Turns request metadata into a two-letter code before the engine runs.
//! Order: explicit body value, edge country headers, remote IP lookup,
//! region of the `Accept-Language` tags, then the configured default.
//! Only codes the factor table knows are adopted from headers and lookups,
//! so an unsupported guess never hides a usable one further down. The remote
//! lookup is the only step doing I/O and is bounded by a timeout.

use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::tables::{normalize_code, FactorTable};

/// Headers set by CDNs and proxies, in priority order
pub const COUNTRY_HEADERS: &[&str] = &["cf-ipcountry", "x-country-code"];

/// Where a resolved code came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySource {
    Request,
    Edge,
    Lookup,
    Locale,
    Fallback,
}

/// Remote IP-to-country service
#[async_trait]
pub trait CountryLookup: Send + Sync {
    /// Best-guess code for a client address, `None` when unknown
    async fn country_for_ip(&self, ip: IpAddr) -> Option<String>;
}

/// HTTP lookup against an ipapi-style JSON endpoint
///
/// `url_template` contains `{ip}`, e.g. `https://ipapi.co/{ip}/json/`; the
/// response must carry a `country` field.
pub struct HttpCountryLookup {
    client: reqwest::Client,
    url_template: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    country: Option<String>,
}

impl HttpCountryLookup {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url_template: url_template.into(),
        }
    }
}

#[async_trait]
impl CountryLookup for HttpCountryLookup {
    async fn country_for_ip(&self, ip: IpAddr) -> Option<String> {
        let url = self.url_template.replace("{ip}", &ip.to_string());
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Country lookup request failed");
                return None;
            }
        };
        match response.error_for_status() {
            Ok(response) => response.json::<LookupResponse>().await.ok()?.country,
            Err(e) => {
                debug!(error = %e, "Country lookup returned an error status");
                None
            }
        }
    }
}

fn valid_code(raw: &str) -> Option<String> {
    let code = normalize_code(raw);
    // "XX" is the placeholder some proxies send for unknown clients
    let usable = code.len() == 2
        && code.chars().all(|c| c.is_ascii_alphabetic())
        && code != "XX";
    usable.then_some(code)
}

/// Region subtags of the `Accept-Language` entries, in header order
fn regions_from_accept_language(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .filter_map(|tag| {
            tag.split(['-', '_'])
                .skip(1)
                .find(|sub| sub.len() == 2 && sub.chars().all(|c| c.is_ascii_alphabetic()))
                .and_then(valid_code)
        })
        .collect()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Codes from edge headers, in priority order
pub fn edge_countries(headers: &HeaderMap) -> Vec<String> {
    COUNTRY_HEADERS
        .iter()
        .filter_map(|name| header_str(headers, name).and_then(valid_code))
        .collect()
}

/// Codes from `Accept-Language`, in preference order
pub fn locale_countries(headers: &HeaderMap) -> Vec<String> {
    header_str(headers, axum::http::header::ACCEPT_LANGUAGE.as_str())
        .map(regions_from_accept_language)
        .unwrap_or_default()
}

/// Public client address from proxy headers
pub fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim);
    let ip: IpAddr = forwarded
        .or_else(|| header_str(headers, "x-real-ip").map(str::trim))?
        .parse()
        .ok()?;

    let private = match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
    };
    (!private).then_some(ip)
}

/// Run a country lookup with a bounded timeout
///
/// Yields a normalized code, or `None` on timeout, no answer, or an unusable code.
pub async fn resolve_country<F>(lookup: F, timeout: Duration) -> Option<String>
where
    F: Future<Output = Option<String>>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Some(raw)) => {
            let code = valid_code(&raw);
            if code.is_none() {
                debug!(%raw, "Lookup returned unusable code");
            }
            code
        }
        Ok(None) => None,
        Err(_) => {
            warn!(?timeout, "Country lookup timed out");
            None
        }
    }
}

/// Inputs for resolving one request's country
pub struct CountryContext<'a> {
    pub factors: &'a FactorTable,
    pub lookup: Option<&'a dyn CountryLookup>,
    pub timeout: Duration,
    pub fallback: &'a str,
}

/// Country for a request: explicit value, else the first supported guess,
/// else the fallback
pub async fn country_for_request(
    explicit: Option<&str>,
    headers: &HeaderMap,
    ctx: &CountryContext<'_>,
) -> (String, CountrySource) {
    if let Some(code) = explicit.filter(|c| !c.trim().is_empty()) {
        return (normalize_code(code), CountrySource::Request);
    }

    let supported = |code: &String| ctx.factors.contains(code);

    if let Some(code) = edge_countries(headers).into_iter().find(supported) {
        return (code, CountrySource::Edge);
    }

    if let (Some(lookup), Some(ip)) = (ctx.lookup, client_ip(headers)) {
        match resolve_country(lookup.country_for_ip(ip), ctx.timeout).await {
            Some(code) if supported(&code) => return (code, CountrySource::Lookup),
            Some(code) => debug!(%code, "Looked-up country has no factors"),
            None => {}
        }
    }

    if let Some(code) = locale_countries(headers).into_iter().find(supported) {
        return (code, CountrySource::Locale);
    }

    (normalize_code(ctx.fallback), CountrySource::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    struct FixedLookup(&'static str);

    #[async_trait]
    impl CountryLookup for FixedLookup {
        async fn country_for_ip(&self, _ip: IpAddr) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    struct SlowLookup;

    #[async_trait]
    impl CountryLookup for SlowLookup {
        async fn country_for_ip(&self, _ip: IpAddr) -> Option<String> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Some("US".to_string())
        }
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    fn ctx<'a>(factors: &'a FactorTable, lookup: Option<&'a dyn CountryLookup>, timeout: Duration) -> CountryContext<'a> {
        CountryContext {
            factors,
            lookup,
            timeout,
            fallback: "GL",
        }
    }

    #[test]
    fn test_header_extraction() {
        let h = headers(&[
            ("x-country-code", "de"),
            ("cf-ipcountry", "XX"),
            ("accept-language", "fr;q=0.8, zh-Hant-TW, en-GB"),
        ]);
        assert_eq!(edge_countries(&h), ["DE"]);
        assert_eq!(locale_countries(&h), ["TW", "GB"]);
        assert!(edge_countries(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_client_ip_skips_private_addresses() {
        let h = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        assert_eq!(client_ip(&h), Some("203.0.113.7".parse().unwrap()));
        assert_eq!(client_ip(&headers(&[("x-real-ip", "192.168.1.4")])), None);
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Some("US".to_string())
        };
        assert_eq!(resolve_country(slow, Duration::from_millis(10)).await, None);
        assert_eq!(
            resolve_country(async { Some("in".to_string()) }, Duration::from_millis(10)).await,
            Some("IN".to_string())
        );
    }

    #[tokio::test]
    async fn test_slow_lookup_gives_way_to_locale() {
        let factors = FactorTable::builtin();
        let lookup: &dyn CountryLookup = &SlowLookup;
        let h = headers(&[("x-forwarded-for", "203.0.113.7"), ("accept-language", "en-GB")]);

        let resolved = country_for_request(None, &h, &ctx(&factors, Some(lookup), Duration::ZERO)).await;
        assert_eq!(resolved, ("GB".to_string(), CountrySource::Locale));

        let resolved = country_for_request(None, &h, &ctx(&factors, Some(lookup), Duration::from_secs(5))).await;
        assert_eq!(resolved, ("US".to_string(), CountrySource::Lookup));
    }

    #[tokio::test]
    async fn test_unsupported_guess_does_not_hide_supported_one() {
        let factors = FactorTable::builtin();
        let h = headers(&[("cf-ipcountry", "FR"), ("accept-language", "en-GB")]);
        let resolved = country_for_request(None, &h, &ctx(&factors, None, Duration::ZERO)).await;
        assert_eq!(resolved, ("GB".to_string(), CountrySource::Locale));

        let lookup: &dyn CountryLookup = &FixedLookup("fr");
        let h = headers(&[("x-forwarded-for", "203.0.113.7"), ("accept-language", "de-DE")]);
        let resolved = country_for_request(None, &h, &ctx(&factors, Some(lookup), Duration::from_secs(1))).await;
        assert_eq!(resolved, ("DE".to_string(), CountrySource::Locale));

        let h = headers(&[("cf-ipcountry", "FR")]);
        let resolved = country_for_request(None, &h, &ctx(&factors, None, Duration::ZERO)).await;
        assert_eq!(resolved, ("GL".to_string(), CountrySource::Fallback));
    }

    #[tokio::test]
    async fn test_explicit_country_wins() {
        let factors = FactorTable::builtin();
        let h = headers(&[("cf-ipcountry", "IN")]);
        let resolved = country_for_request(Some(" us"), &h, &ctx(&factors, None, Duration::ZERO)).await;
        assert_eq!(resolved, ("US".to_string(), CountrySource::Request));

        let resolved = country_for_request(None, &h, &ctx(&factors, None, Duration::ZERO)).await;
        assert_eq!(resolved, ("IN".to_string(), CountrySource::Edge));
    }
}
