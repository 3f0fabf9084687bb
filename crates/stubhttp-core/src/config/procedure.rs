//! Procedure file schema.

use crate::types::procedure::{Headers, Procedure, ResponseTemplate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response section of a procedure entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// HTTP status code, 200 when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response headers
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    /// Response body: strings are sent verbatim, other values as JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// One procedure entry in a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureConfig {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub response: ResponseConfig,
}

impl From<ResponseConfig> for ResponseTemplate {
    fn from(config: ResponseConfig) -> Self {
        let body = match config.body {
            None => Vec::new(),
            Some(Value::String(text)) => text.into_bytes(),
            Some(value) => value.to_string().into_bytes(),
        };
        ResponseTemplate {
            status: config.status,
            headers: config.headers,
            body,
        }
    }
}

impl From<ProcedureConfig> for Procedure {
    fn from(config: ProcedureConfig) -> Self {
        Procedure::new(config.method, config.path).respond_with(config.response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, b"".to_vec())]
    #[case(Some(json!("getRoot")), b"getRoot".to_vec())]
    #[case(Some(json!({"id": 1})), br#"{"id":1}"#.to_vec())]
    #[case(Some(json!([1, 2])), b"[1,2]".to_vec())]
    fn test_response_body_conversion(#[case] body: Option<Value>, #[case] expected: Vec<u8>) {
        let template: ResponseTemplate = ResponseConfig {
            body,
            ..ResponseConfig::default()
        }
        .into();
        assert_eq!(template.body, expected);
    }

    #[rstest]
    fn test_procedure_conversion() {
        let config = ProcedureConfig {
            method: "GET".to_string(),
            path: "/get/header".to_string(),
            response: ResponseConfig {
                status: Some(202),
                headers: Headers::from([(
                    "some-key".to_string(),
                    vec!["some-value".to_string()],
                )]),
                body: Some(json!("getResponseHeader")),
            },
        };

        let procedure: Procedure = config.into();
        assert_eq!(
            procedure,
            Procedure::new("GET", "/get/header").respond_with(
                ResponseTemplate::new()
                    .with_status(202)
                    .with_header("some-key", "some-value")
                    .with_body("getResponseHeader")
            )
        );
    }

    #[rstest]
    fn test_response_section_is_optional() {
        let config: ProcedureConfig =
            serde_json::from_str(r#"{"method": "DELETE", "path": "/item"}"#).unwrap();
        assert_eq!(config.response, ResponseConfig::default());
        assert!(!serde_json::to_string(&config.response).unwrap().contains("headers"));
    }
}
