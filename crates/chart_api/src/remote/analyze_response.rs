use common::models::AnalysisResult;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Serialize, Debug)]
pub struct AnalyzeRequest<'a> {
    pub filename: &'a str,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyzeResponse {
    #[serde(rename = "aiResult", default)]
    pub ai_result: Option<AnalysisResult>,
}

impl AnalyzeResponse {
    pub fn into_result(self) -> Result<AnalysisResult, ApiError> {
        self.ai_result
            .ok_or_else(|| ApiError::Rejected("response carried no aiResult".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&AnalyzeRequest { filename: "abc123.png" }).unwrap();
        assert_eq!(body, r#"{"filename":"abc123.png"}"#);
    }

    #[test]
    fn test_extracts_nested_result() {
        let json = r#"{"aiResult":{"signal":"BUY","entry":"100","stopLoss":"95","target":"120","confidence":"80%"},"model":"v2"}"#;
        let result = serde_json::from_str::<AnalyzeResponse>(json)
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(result.signal.to_string(), "BUY");
        assert_eq!(result.stop_loss.to_string(), "95");
    }

    #[test]
    fn test_missing_result_is_rejected() {
        let resp: AnalyzeResponse = serde_json::from_str(r#"{"error":"busy"}"#).unwrap();
        assert!(matches!(resp.into_result(), Err(ApiError::Rejected(_))));
    }

    #[test]
    fn test_partial_result_fails_to_decode() {
        let json = r#"{"aiResult":{"signal":"BUY"}}"#;
        assert!(serde_json::from_str::<AnalyzeResponse>(json).is_err());
    }
}
