use serde::Serialize;

use crate::error::Result;

/// Format any serializable value as JSON
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Attach a `saved` flag to a serialized record
pub fn format_with_saved<T: Serialize>(record: &T, saved: bool) -> Result<String> {
    let mut value = serde_json::to_value(record)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("saved".to_string(), serde_json::Value::Bool(saved));
    }
    format_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback;

    #[test]
    fn test_format_json_uses_camel_case_fields() {
        let courses = fallback::courses();
        let output = format_json(&courses[..1]).unwrap();

        assert!(output.contains("\"enrolledCount\""));
        assert!(output.contains("\"startDate\""));
    }

    #[test]
    fn test_format_with_saved() {
        let event = &fallback::events()[0];
        let output = format_with_saved(event, true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["saved"], true);
        assert_eq!(json["id"], event.id.as_str());
        assert_eq!(json["isOnline"], event.is_online);
    }
}
