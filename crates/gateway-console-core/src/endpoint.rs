//! Gateway address normalization.

/// Gateway address with its two derived endpoint forms.
///
/// Constructed once from the configured address; `http_base` and `ws_base`
/// differ only in scheme and are never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayAddress {
    http_base: String,
    ws_base: String,
}

impl GatewayAddress {
    /// Normalize a raw address into its http and ws forms.
    ///
    /// Scheme matching is case-insensitive: `https`/`wss` map to
    /// (`https`, `wss`), `http`/`ws` map to (`http`, `ws`). An address
    /// without a recognized scheme is treated as already being in http
    /// form and prefixed accordingly. Normalization is idempotent.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');

        let (scheme, rest) = match trimmed.split_once("://") {
            Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
            None => (String::new(), trimmed),
        };

        let (http_scheme, ws_scheme) = match scheme.as_str() {
            "https" | "wss" => ("https", "wss"),
            _ => ("http", "ws"),
        };

        Self {
            http_base: format!("{http_scheme}://{rest}"),
            ws_base: format!("{ws_scheme}://{rest}"),
        }
    }

    /// The http(s) form of the address.
    #[must_use]
    pub fn http_base(&self) -> &str {
        &self.http_base
    }

    /// The ws(s) form of the address.
    #[must_use]
    pub fn ws_base(&self) -> &str {
        &self.ws_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_address() {
        let addr = GatewayAddress::new("http://localhost:3000");
        assert_eq!(addr.http_base(), "http://localhost:3000");
        assert_eq!(addr.ws_base(), "ws://localhost:3000");
    }

    #[test]
    fn test_https_address() {
        let addr = GatewayAddress::new("https://gateway.example.com");
        assert_eq!(addr.http_base(), "https://gateway.example.com");
        assert_eq!(addr.ws_base(), "wss://gateway.example.com");
    }

    #[test]
    fn test_ws_address_maps_back_to_http() {
        let addr = GatewayAddress::new("wss://gateway.example.com:8443");
        assert_eq!(addr.http_base(), "https://gateway.example.com:8443");
        assert_eq!(addr.ws_base(), "wss://gateway.example.com:8443");
    }

    #[test]
    fn test_scheme_matching_is_case_insensitive() {
        let addr = GatewayAddress::new("HTTPS://Gateway.Example.com");
        assert_eq!(addr.http_base(), "https://Gateway.Example.com");
        assert_eq!(addr.ws_base(), "wss://Gateway.Example.com");
    }

    #[test]
    fn test_bare_host_treated_as_http() {
        let addr = GatewayAddress::new("localhost:3000");
        assert_eq!(addr.http_base(), "http://localhost:3000");
        assert_eq!(addr.ws_base(), "ws://localhost:3000");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let addr = GatewayAddress::new("http://localhost:3000/");
        assert_eq!(addr.http_base(), "http://localhost:3000");
    }

    #[test]
    fn test_both_forms_share_host_and_port() {
        for raw in ["http://h:1234", "https://h:1234", "h:1234"] {
            let addr = GatewayAddress::new(raw);
            let http_rest = addr.http_base().split_once("://").unwrap().1;
            let ws_rest = addr.ws_base().split_once("://").unwrap().1;
            assert_eq!(http_rest, ws_rest);
            assert_eq!(http_rest, "h:1234");
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["http://h:1", "https://h:1", "h:1", "WS://h:1"] {
            let once = GatewayAddress::new(raw);
            let twice = GatewayAddress::new(once.http_base());
            assert_eq!(once.http_base(), twice.http_base());
            assert_eq!(once.ws_base(), twice.ws_base());
        }
    }
}
