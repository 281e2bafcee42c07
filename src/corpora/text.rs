/*! Text normalization helpers shared by corpus parsers.
!*/
use itertools::Itertools;
use serde_json::{Map, Value};
use unic_ucd::GeneralCategory;

use crate::error::Error;

/// Returns `true` if `c` is in one of the Unicode punctuation categories (`P*`).
pub fn is_punctuation(c: char) -> bool {
    GeneralCategory::of(c).is_punctuation()
}

/// Trims `text` and appends a `.` if it doesn't end with punctuation.
///
/// Returns [None] on blank text.
pub fn terminate(text: &str) -> Option<String> {
    let text = text.trim();
    let last = text.chars().last()?;
    if is_punctuation(last) {
        Some(text.to_string())
    } else {
        Some(format!("{}.", text))
    }
}

/// Joins non-blank paragraphs into a single page, ensuring each one ends with punctuation.
pub fn join_page<'a, I>(paragraphs: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    paragraphs
        .into_iter()
        .filter_map(terminate)
        .join(" ")
}

/// String at `key`, or `default` if absent or null.
///
/// Numbers and booleans are accepted and written as text.
pub fn str_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// String at `key`, failing if absent.
pub fn str_req(
    obj: &Map<String, Value>,
    key: &'static str,
    context: &str,
) -> Result<String, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(Error::missing(key, context)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// View `value` as an object.
pub fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>, Error> {
    value
        .as_object()
        .ok_or_else(|| Error::Custom(format!("{}: expected an object, got {}", context, value)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn punctuation_categories() {
        for c in ['.', '?', '!', ',', '…', '」', '"', '-', '。'] {
            assert!(is_punctuation(c), "{:?}", c);
        }
        for c in ['a', '다', '1', ' ', '+', '$'] {
            assert!(!is_punctuation(c), "{:?}", c);
        }
    }

    #[test]
    fn terminate_text() {
        assert_eq!(terminate("  안녕하세요  "), Some("안녕하세요.".to_string()));
        assert_eq!(terminate("정말?"), Some("정말?".to_string()));
        assert_eq!(terminate("   "), None);
        assert_eq!(terminate(""), None);
    }

    #[test]
    fn page_joining() {
        let page = join_page(vec!["제목", "", "첫 문단이다.", "  둘째 문단 "]);
        assert_eq!(page, "제목. 첫 문단이다. 둘째 문단.");
        assert_eq!(join_page(Vec::<&str>::new()), "");
    }

    #[test]
    fn field_defaults() {
        let obj = json!({"age": "20대", "n": 3, "none": null});
        let obj = obj.as_object().unwrap();
        assert_eq!(str_or(obj, "age", "NA"), "20대");
        assert_eq!(str_or(obj, "n", "NA"), "3");
        assert_eq!(str_or(obj, "none", "NA"), "NA");
        assert_eq!(str_or(obj, "sex", "NA"), "NA");
        assert!(str_req(obj, "sex", "speaker").is_err());
    }
}
