//! `${NAME}` references inside connector `env` values.
//!
//! A connector's `env` block usually points at the host environment instead of
//! carrying secrets inline: `"GITHUB_TOKEN": "${GITHUB_TOKEN}"`. A name may not
//! be empty or contain `$`, `{` or whitespace. Anything that is not a closed,
//! well-formed reference stays literal text.

/// Scan `value` for placeholders, in order of appearance.
#[must_use]
pub fn placeholders(value: &str) -> Vec<&str> {
    segments(value)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Whether `value` contains at least one placeholder.
#[must_use]
pub fn has_placeholder(value: &str) -> bool {
    !placeholders(value).is_empty()
}

/// Replace every placeholder using `lookup`.
///
/// # Errors
///
/// Returns the names `lookup` could not resolve, deduplicated, in order of
/// first appearance.
pub fn expand_placeholders<F>(value: &str, lookup: F) -> Result<String, Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut missing: Vec<String> = Vec::new();

    for segment in segments(value) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => match lookup(name) {
                Some(resolved) => out.push_str(&resolved),
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                }
            },
        }
    }

    if missing.is_empty() {
        Ok(out)
    } else {
        Err(missing)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn segments(value: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if !is_name(name) {
            // Keep the `${` as text and rescan from just past it.
            out.push(Segment::Literal(&rest[..start + 2]));
            rest = after;
            continue;
        }
        if start > 0 {
            out.push(Segment::Literal(&rest[..start]));
        }
        out.push(Segment::Placeholder(name));
        rest = &after[end + 1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

fn is_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '$' || c == '{' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/analyst".into()),
            "TOKEN" => Some("ghp_123".into()),
            _ => None,
        }
    }

    #[test]
    fn finds_placeholders_in_order() {
        assert_eq!(
            placeholders("${HOME}/data:${TOKEN}"),
            vec!["HOME", "TOKEN"]
        );
    }

    #[test]
    fn literal_values_have_no_placeholders() {
        assert!(placeholders("plain-value").is_empty());
        assert!(!has_placeholder("ghp_literal"));
    }

    #[test]
    fn unterminated_and_empty_are_literal() {
        assert!(placeholders("${UNCLOSED").is_empty());
        assert!(placeholders("${}").is_empty());
        assert_eq!(
            expand_placeholders("a${}b", lookup).unwrap(),
            "a${}b".to_string()
        );
        assert_eq!(
            expand_placeholders("x${HOME", lookup).unwrap(),
            "x${HOME".to_string()
        );
    }

    #[test]
    fn malformed_names_stay_literal() {
        assert!(placeholders("${ }").is_empty());
        assert!(placeholders("${A B}").is_empty());
        assert_eq!(placeholders("${a${TOKEN}}"), vec!["TOKEN"]);
        assert_eq!(
            expand_placeholders("${a${TOKEN}}", lookup).unwrap(),
            "${aghp_123}".to_string()
        );
        assert_eq!(
            expand_placeholders("pre ${ } post", lookup).unwrap(),
            "pre ${ } post".to_string()
        );
    }

    #[test]
    fn expands_all_references() {
        assert_eq!(
            expand_placeholders("token=${TOKEN} dir=${HOME}/x", lookup).unwrap(),
            "token=ghp_123 dir=/home/analyst/x"
        );
    }

    #[test]
    fn reports_missing_names_once() {
        let err = expand_placeholders("${NOPE}-${HOME}-${NOPE}-${ALSO}", lookup).unwrap_err();
        assert_eq!(err, vec!["NOPE".to_string(), "ALSO".to_string()]);
    }
}
