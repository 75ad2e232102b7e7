use std::borrow::Cow;

use serde_json::Value;

use crate::annotations::rewrite_annotations;

/// Rewrite the annotations of every string value inside `value`, object keys stay as they are.
/// Returns the number of strings which were changed.
pub fn rewrite_json_strings(value: &mut Value) -> usize {
    match value {
        Value::String(s) => {
            let rewritten = match rewrite_annotations(s) {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            };
            if let Some(rewritten) = rewritten {
                *s = rewritten;
                1
            } else {
                0
            }
        }
        Value::Array(items) => items.iter_mut().map(rewrite_json_strings).sum(),
        Value::Object(map) => map.values_mut().map(rewrite_json_strings).sum(),
        Value::Null | Value::Bool(_) | Value::Number(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rewrite_nested() {
        let mut value = json!({
            "character": "马",
            "pinyin": ["ma3"],
            "definition": "horse; surname [Ma3]",
            "[ma3]": 1,
            "words": [
                {"word": "马上", "definition": "at once [ma3shang4]"},
                {"word": "骑马", "definition": "to ride [qi2] a horse"}
            ],
            "frequency": 412,
            "radical": null
        });
        assert_eq!(rewrite_json_strings(&mut value), 2);
        assert_eq!(
            value,
            json!({
                "character": "马",
                "pinyin": ["ma3"],
                "definition": "horse; surname [mǎ]",
                "[ma3]": 1,
                "words": [
                    {"word": "马上", "definition": "at once [ma3shang4]"},
                    {"word": "骑马", "definition": "to ride [qí] a horse"}
                ],
                "frequency": 412,
                "radical": null
            })
        );
    }

    #[test]
    fn test_nothing_to_rewrite() {
        let mut value = json!(["plain", 1, true, {"a": "b"}]);
        let expected = value.clone();
        assert_eq!(rewrite_json_strings(&mut value), 0);
        assert_eq!(value, expected);
    }
}
