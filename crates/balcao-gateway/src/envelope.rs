// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `{success, data|error, message}` JSON envelope every non-passthrough
//! endpoint answers with.

use serde::Serialize;
use serde_json::Value;

/// Standard API response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Successful response carrying data.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response with data and a human message.
    pub fn ok_with_message(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// Failure with an error label and explanatory message.
    pub fn error(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }

    /// Failure carrying only a message (the search miss shape).
    pub fn failure_message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_omits_error_fields() {
        let json = serde_json::to_value(ApiResponse::ok(serde_json::json!({"a": 1}))).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["a"], 1);
        assert!(json.get("error").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn error_carries_both_strings() {
        let json =
            serde_json::to_value(ApiResponse::error("Email inválido", "Formato de email inválido"))
                .unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Email inválido");
        assert_eq!(json["message"], "Formato de email inválido");
        assert!(json.get("data").is_none());
    }
}
