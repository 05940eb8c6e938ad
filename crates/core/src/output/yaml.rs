use super::FormatError;
use serde::Serialize;

/// Serialize to YAML
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(value).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementStats;

    #[test]
    fn test_to_yaml() {
        let yaml = to_yaml(&ElementStats::default()).unwrap();
        assert!(yaml.contains("total_elements: 0"));
    }
}
