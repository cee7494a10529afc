use serde::Deserialize;

/// The error document returned by the X API on non-success responses.
///
/// v2 endpoints answer with an RFC 7807 style problem (`title`, `detail`); some
/// failures still come back in the older `errors: [{message}]` shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(default)]
    pub errors: Vec<ProblemEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemEntry {
    pub message: Option<String>,
}

impl ApiProblem {
    /// A one-line message for an error body, falling back to the raw text.
    pub fn describe(body: &str) -> String {
        let parsed = serde_json::from_str::<ApiProblem>(body).ok();
        let message = parsed.and_then(|p| {
            p.detail
                .or(p.title)
                .or_else(|| p.errors.into_iter().find_map(|e| e.message))
        });
        match message {
            Some(m) => m,
            None if body.trim().is_empty() => "empty response body".to_string(),
            None => body.chars().take(200).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_over_title() {
        let body = r#"{"title":"Unauthorized","detail":"Unauthorized","type":"about:blank","status":401}"#;
        assert_eq!(ApiProblem::describe(body), "Unauthorized");
        let body = r#"{"title":"Too Many Requests","detail":"Rate limit exceeded"}"#;
        assert_eq!(ApiProblem::describe(body), "Rate limit exceeded");
    }

    #[test]
    fn reads_legacy_errors_array() {
        let body = r#"{"errors":[{"message":"Invalid query","code":400}]}"#;
        assert_eq!(ApiProblem::describe(body), "Invalid query");
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(ApiProblem::describe("Bad Gateway"), "Bad Gateway");
        assert_eq!(ApiProblem::describe(""), "empty response body");
    }
}
