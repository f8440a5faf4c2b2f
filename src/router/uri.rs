//! Reverse URL generation.

use crate::compiler::CompiledRoute;
use crate::error::{Result, RouterError};
use crate::pattern::Segment;
use std::collections::HashMap;
use url::form_urlencoded;

/// Build a URI for `route` from placeholder values and query pairs.
///
/// Alternatives are tried richest first; the first one whose placeholders are
/// all present in `params` is used. Values are inserted verbatim.
pub(crate) fn build_uri<Q, K, V>(
    route: &CompiledRoute,
    params: &HashMap<String, String>,
    query: Q,
) -> Result<String>
where
    Q: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut missing = None;
    let path = route.alternatives.iter().rev().find_map(|alternative| {
        fill(alternative, params)
            .map_err(|name| missing = Some(name.to_string()))
            .ok()
    });
    let mut uri = path.ok_or_else(|| RouterError::MissingUrlParameter {
        segment: missing.unwrap_or_default(),
    })?;

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut pairs = 0usize;
    for (key, value) in query {
        serializer.append_pair(key.as_ref(), value.as_ref());
        pairs += 1;
    }
    if pairs > 0 {
        uri.push('?');
        uri.push_str(&serializer.finish());
    }
    Ok(uri)
}

/// Concatenate one alternative, or name the first placeholder without a value.
fn fill<'a>(segments: &'a [Segment], params: &HashMap<String, String>) -> std::result::Result<String, &'a str> {
    segments.iter().try_fold(String::new(), |mut out, segment| {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder { name, .. } => out.push_str(params.get(name).ok_or(name.as_str())?),
        }
        Ok::<_, &'a str>(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse;
    use serde_json::Value;

    fn route(pattern: &str) -> CompiledRoute {
        CompiledRoute {
            alternatives: parse(pattern).unwrap(),
            methods: vec!["GET".into()],
            pattern: pattern.to_string(),
            middlewares: Vec::new(),
            handler: Value::Null,
            group: None,
        }
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const NO_QUERY: [(&str, &str); 0] = [];

    #[test]
    fn test_most_specific_alternative_with_all_params_wins() {
        let r = route(r"/articles/{id:\d+}[/{title}]");
        assert_eq!(
            build_uri(&r, &params(&[("id", "10"), ("title", "my-story")]), NO_QUERY).unwrap(),
            "/articles/10/my-story"
        );
        assert_eq!(build_uri(&r, &params(&[("id", "10")]), NO_QUERY).unwrap(), "/articles/10");
    }

    #[test]
    fn test_missing_required_param_is_reported() {
        let r = route(r"/articles/{id:\d+}[/{title}]");
        match build_uri(&r, &params(&[("title", "x")]), NO_QUERY) {
            Err(RouterError::MissingUrlParameter { segment }) => assert_eq!(segment, "id"),
            other => panic!("expected MissingUrlParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_optionals_stop_at_first_gap() {
        let r = route("/news[/{year}[/{month}]]");
        assert_eq!(
            build_uri(&r, &params(&[("month", "05")]), NO_QUERY).unwrap(),
            "/news"
        );
        assert_eq!(
            build_uri(&r, &params(&[("year", "2024")]), NO_QUERY).unwrap(),
            "/news/2024"
        );
    }

    #[test]
    fn test_query_string_in_given_order() {
        let r = route("/foo");
        assert_eq!(
            build_uri(&r, &params(&[("unused", "x")]), [("x", "100"), ("y", "z")]).unwrap(),
            "/foo?x=100&y=z"
        );
        assert_eq!(
            build_uri(&r, &HashMap::new(), [("q", "a b&c")]).unwrap(),
            "/foo?q=a+b%26c"
        );
    }
}
