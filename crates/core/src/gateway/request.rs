use crate::gateway::registry::{Dialect, ProviderDescriptor};
use crate::gateway::TranslationRequest;
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Fully-described outbound call, ready for a transport to execute.
/// Building one performs no I/O.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundCall {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl OutboundCall {
    /// Final request URL with query parameters form-encoded onto the base.
    pub fn request_url(&self) -> Result<Url, url::ParseError> {
        if self.query.is_empty() {
            Url::parse(&self.url)
        } else {
            Url::parse_with_params(&self.url, &self.query)
        }
    }
}

/// Maps a translation request onto one provider's wire dialect.
pub fn build(descriptor: &ProviderDescriptor, request: &TranslationRequest) -> OutboundCall {
    match descriptor.dialect {
        Dialect::Libre => OutboundCall {
            method: Method::POST,
            url: descriptor.url.clone(),
            headers: vec![("Content-Type", "application/json")],
            query: Vec::new(),
            body: Some(serde_json::json!({
                "q": request.text,
                "source": request.source,
                "target": request.target,
                "format": "text",
            })),
        },
        Dialect::Google => OutboundCall {
            method: Method::GET,
            url: descriptor.url.clone(),
            headers: Vec::new(),
            query: vec![
                ("client", "gtx".to_owned()),
                ("sl", request.source.clone()),
                ("tl", request.target.clone()),
                ("dt", "t".to_owned()),
                ("q", request.text.clone()),
            ],
            body: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn libre() -> ProviderDescriptor {
        ProviderDescriptor {
            dialect: Dialect::Libre,
            url: "https://libre.example/translate".to_owned(),
        }
    }

    fn google() -> ProviderDescriptor {
        ProviderDescriptor {
            dialect: Dialect::Google,
            url: "https://google.example/translate_a/single".to_owned(),
        }
    }

    fn request() -> TranslationRequest {
        TranslationRequest::new("selam no", "am", "en")
    }

    #[test]
    fn libre_builds_post_with_json_body() {
        let call = build(&libre(), &request());
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.url, "https://libre.example/translate");
        assert_eq!(call.headers, vec![("Content-Type", "application/json")]);
        assert!(call.query.is_empty());
        assert_eq!(
            call.body,
            Some(serde_json::json!({
                "q": "selam no",
                "source": "am",
                "target": "en",
                "format": "text",
            }))
        );
    }

    #[test]
    fn google_builds_get_with_query_params() {
        let call = build(&google(), &request());
        assert_eq!(call.method, Method::GET);
        assert!(call.body.is_none());
        assert!(call.headers.is_empty());
        assert_eq!(
            call.query,
            vec![
                ("client", "gtx".to_owned()),
                ("sl", "am".to_owned()),
                ("tl", "en".to_owned()),
                ("dt", "t".to_owned()),
                ("q", "selam no".to_owned()),
            ]
        );
    }

    #[test]
    fn google_request_url_encodes_query_in_order() {
        let url = build(&google(), &request()).request_url().expect("valid url");
        assert_eq!(url.query(), Some("client=gtx&sl=am&tl=en&dt=t&q=selam+no"));
    }

    #[test]
    fn auto_hint_is_forwarded_literally() {
        let call = build(&google(), &TranslationRequest::new("hi", "auto", "en"));
        assert!(call.query.contains(&("sl", "auto".to_owned())));
    }

    #[test]
    fn build_is_pure() {
        assert_eq!(build(&libre(), &request()), build(&libre(), &request()));
        assert_eq!(build(&google(), &request()), build(&google(), &request()));
    }

    #[test]
    fn libre_request_url_has_no_query() {
        let url = build(&libre(), &request()).request_url().expect("valid url");
        assert_eq!(url.query(), None);
    }
}
