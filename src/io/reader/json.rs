//! Whole-file JSON reading.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Deserialize the whole file at `path`.
pub fn read_json<T>(path: &Path) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let f = File::open(path)?;
    let br = BufReader::new(f);
    Ok(serde_json::from_reader(br)?)
}

/// Take the array at `key` out of a JSON object.
pub fn take_array(value: &mut Value, key: &'static str, path: &Path) -> Result<Vec<Value>, Error> {
    match value.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::Custom(format!(
            "{:?}: `{}` is not an array",
            path, key
        ))),
        None => Err(Error::missing(key, format!("{:?}", path))),
    }
}

/// Objects are accepted where a list of objects is expected, and are seen as a list of one.
pub fn one_or_many(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn take_array_from_object() {
        let mut v = json!({"data": [1, 2, 3], "version": "1"});
        let items = take_array(&mut v, "data", Path::new("x.json")).unwrap();
        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn take_array_missing_key() {
        let mut v = json!({"document": []});
        let err = take_array(&mut v, "data", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "data", .. }));
    }

    #[test]
    fn one_or_many_shapes() {
        assert_eq!(one_or_many(json!([1, 2])).len(), 2);
        assert_eq!(one_or_many(json!({"a": 1})), vec![json!({"a": 1})]);
        assert!(one_or_many(Value::Null).is_empty());
    }

    #[test]
    fn read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(&path, r#"{"data": [{"id": "a"}]}"#).unwrap();
        let v: Value = read_json(&path).unwrap();
        assert_eq!(v["data"][0]["id"], "a");
    }
}
