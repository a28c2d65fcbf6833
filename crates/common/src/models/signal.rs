use std::fmt;

use serde::{Deserialize, Serialize};

/// A backend-supplied value shown as-is. The analysis service is free to
/// send `"80%"` or `80`, so both shapes are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Trading signal returned by `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub signal: DisplayValue, // "BUY" or "SELL"
    pub entry: DisplayValue,
    pub stop_loss: DisplayValue,
    pub target: DisplayValue,
    pub confidence: DisplayValue, // "80%"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_mixed_string_and_number_fields() {
        let json = r#"{"signal":"SELL","entry":101.5,"stopLoss":"105","target":90,"confidence":"72%"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.signal, DisplayValue::from("SELL"));
        assert_eq!(result.entry.to_string(), "101.5");
        assert_eq!(result.stop_loss, DisplayValue::from("105"));
        assert_eq!(result.target, DisplayValue::from(90));
        assert_eq!(result.confidence.to_string(), "72%");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"signal":"BUY","entry":"100","target":"120","confidence":"80%"}"#;
        let result = serde_json::from_str::<AnalysisResult>(json);

        assert!(result.is_err(), "stopLoss is required, partial results must not decode");
    }
}
