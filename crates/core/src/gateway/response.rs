use crate::gateway::registry::Dialect;
use crate::gateway::{AttemptError, RawResponse};
use serde_json::Value;

const SNIPPET_LEN: usize = 200;

/// Turns one provider's raw HTTP response into an attempt outcome,
/// uniformly across dialects. Pure: no I/O, no hidden state.
pub fn extract(dialect: Dialect, raw: &RawResponse) -> Result<String, AttemptError> {
    match dialect {
        Dialect::Libre => extract_libre(raw),
        Dialect::Google => extract_google(raw),
    }
}

fn extract_libre(raw: &RawResponse) -> Result<String, AttemptError> {
    let parsed = json_body(raw);

    if !is_success(raw.status) {
        return Err(AttemptError::Http(failure_message(raw, parsed.as_ref())));
    }

    let text = parsed
        .as_ref()
        .and_then(|data| data.get("translatedText").or_else(|| data.get("translation")))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    non_empty(text)
}

fn extract_google(raw: &RawResponse) -> Result<String, AttemptError> {
    let parsed: Option<Value> = serde_json::from_str(&raw.body).ok();

    if !is_success(raw.status) {
        return Err(AttemptError::Http(failure_message(raw, parsed.as_ref())));
    }

    let Some(Value::Array(top)) = parsed else {
        return Err(AttemptError::Http(format!(
            "Translation request failed ({})",
            raw.status
        )));
    };

    // Segments live at [0][*][0]; null and empty parts are skipped.
    let text: String = top
        .first()
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get(0))
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    non_empty(text)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Body parsed as JSON when the provider declared it as such. An unparsable
/// JSON-declared body degrades to an empty object, matching the lenient
/// handling the Libre endpoints need.
fn json_body(raw: &RawResponse) -> Option<Value> {
    raw.content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("application/json"))
        .then(|| {
            serde_json::from_str(&raw.body).unwrap_or_else(|_| Value::Object(Default::default()))
        })
}

/// Provider-supplied `error` string when present; otherwise a synthesized
/// message carrying the status code and, for non-JSON bodies, a snippet of
/// the raw text.
fn failure_message(raw: &RawResponse, parsed: Option<&Value>) -> String {
    if let Some(message) = parsed.and_then(|v| v.get("error")).and_then(Value::as_str) {
        return message.to_owned();
    }
    let message = format!("Translation request failed ({})", raw.status);
    if parsed.is_none() {
        let body = raw.body.trim();
        if !body.is_empty() {
            let snippet: String = body.chars().take(SNIPPET_LEN).collect();
            return format!("{message}: {snippet}");
        }
    }
    message
}

fn non_empty(text: String) -> Result<String, AttemptError> {
    if text.trim().is_empty() {
        Err(AttemptError::EmptyResult)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: Some("application/json".to_owned()),
            body: body.to_owned(),
        }
    }

    #[test]
    fn libre_success_reads_translated_text() {
        let raw = json_response(200, r#"{"translatedText":"hello"}"#);
        assert_eq!(extract(Dialect::Libre, &raw), Ok("hello".to_owned()));
    }

    #[test]
    fn libre_falls_back_to_translation_key() {
        let raw = json_response(200, r#"{"translation":"hello"}"#);
        assert_eq!(extract(Dialect::Libre, &raw), Ok("hello".to_owned()));
    }

    #[test]
    fn libre_empty_object_is_empty_result() {
        let raw = json_response(200, "{}");
        assert_eq!(extract(Dialect::Libre, &raw), Err(AttemptError::EmptyResult));
    }

    #[test]
    fn libre_whitespace_only_is_empty_result() {
        let raw = json_response(200, r#"{"translatedText":"   "}"#);
        assert_eq!(extract(Dialect::Libre, &raw), Err(AttemptError::EmptyResult));
    }

    #[test]
    fn libre_error_field_passes_through() {
        let raw = json_response(400, r#"{"error":"unsupported language pair"}"#);
        assert_eq!(
            extract(Dialect::Libre, &raw),
            Err(AttemptError::Http("unsupported language pair".to_owned()))
        );
    }

    #[test]
    fn libre_non_json_failure_embeds_status_and_body() {
        let raw = RawResponse {
            status: 503,
            content_type: Some("text/html".to_owned()),
            body: "<h1>overloaded</h1>".to_owned(),
        };
        assert_eq!(
            extract(Dialect::Libre, &raw),
            Err(AttemptError::Http(
                "Translation request failed (503): <h1>overloaded</h1>".to_owned()
            ))
        );
    }

    #[test]
    fn libre_unparsable_json_failure_keeps_status_message() {
        let raw = json_response(502, "not json at all");
        assert_eq!(
            extract(Dialect::Libre, &raw),
            Err(AttemptError::Http("Translation request failed (502)".to_owned()))
        );
    }

    #[test]
    fn google_concatenates_first_elements() {
        let raw = json_response(200, r#"[[["hello","ciao",null,null,null]],null,"it"]"#);
        assert_eq!(extract(Dialect::Google, &raw), Ok("hello".to_owned()));
    }

    #[test]
    fn google_joins_segments_without_separator() {
        let raw = json_response(200, r#"[[["Hello ","Ciao "],["world","mondo"]],null,"it"]"#);
        assert_eq!(extract(Dialect::Google, &raw), Ok("Hello world".to_owned()));
    }

    #[test]
    fn google_skips_falsy_segments() {
        let raw = json_response(200, r#"[[["a"],[null],[""],["b"]]]"#);
        assert_eq!(extract(Dialect::Google, &raw), Ok("ab".to_owned()));
    }

    #[test]
    fn google_non_array_body_is_http_failure() {
        let raw = json_response(200, r#"{"unexpected":"object"}"#);
        assert_eq!(
            extract(Dialect::Google, &raw),
            Err(AttemptError::Http("Translation request failed (200)".to_owned()))
        );
    }

    #[test]
    fn google_failure_status_reports_status() {
        let raw = json_response(429, "[]");
        assert_eq!(
            extract(Dialect::Google, &raw),
            Err(AttemptError::Http("Translation request failed (429)".to_owned()))
        );
    }

    #[test]
    fn google_empty_segments_are_empty_result() {
        let raw = json_response(200, r#"[[],null,"it"]"#);
        assert_eq!(extract(Dialect::Google, &raw), Err(AttemptError::EmptyResult));
    }

    #[test]
    fn extract_is_pure() {
        let raw = json_response(200, r#"{"translatedText":"hello"}"#);
        assert_eq!(extract(Dialect::Libre, &raw), extract(Dialect::Libre, &raw));
    }
}
