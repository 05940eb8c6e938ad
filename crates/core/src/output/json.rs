use super::FormatError;
use serde::Serialize;

/// Serialize to pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Element, ElementKind};

    #[test]
    fn test_to_json() {
        let element = Element::new(ElementKind::Class, "Car", "class Car {", 4);
        let json = to_json(&element).unwrap();

        assert!(json.contains("\"kind\": \"class\""));
        assert!(json.contains("\"start_line\": 4"));
    }
}
