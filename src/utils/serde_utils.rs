use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field from an explicit `null` in update payloads:
/// missing stays `None`, `null` becomes `Some(None)` and clears the column,
/// a value becomes `Some(Some(v))`. Pair with `#[serde(default, ...)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "double_option")]
        manager_id: Option<Option<i64>>,
    }

    #[test]
    fn absent_field_is_none() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.manager_id.is_none());
    }

    #[test]
    fn explicit_null_is_some_none() {
        let p: Payload = serde_json::from_str(r#"{"manager_id": null}"#).unwrap();
        assert_eq!(p.manager_id, Some(None));
    }

    #[test]
    fn value_is_some_some() {
        let p: Payload = serde_json::from_str(r#"{"manager_id": 4}"#).unwrap();
        assert_eq!(p.manager_id, Some(Some(4)));
    }
}
