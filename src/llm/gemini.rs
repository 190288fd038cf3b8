//! Gemini REST gateway implementation.
//!
//! Talks to the `generateContent` endpoint. The provider is stateless over
//! REST, so every exchange re-sends the full turn history; tool results are
//! carried as `functionResponse` parts whose payload is `{"result": ...}`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::tools::ToolDeclaration;

use super::{GatewayError, ModelGateway, ModelReply, Turn};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini generateContent API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn send_turn(
        &self,
        system_instruction: Option<&str>,
        tools: &[ToolDeclaration],
        history: &[Turn],
    ) -> Result<ModelReply, GatewayError> {
        let request = GenerateContentRequest {
            system_instruction: system_instruction.map(|text| WireContent {
                role: None,
                parts: vec![WirePart {
                    text: Some(text.to_string()),
                    ..Default::default()
                }],
            }),
            contents: history.iter().map(content_from_turn).collect(),
            tools: if tools.is_empty() {
                Vec::new()
            } else {
                vec![WireToolSet {
                    function_declarations: tools.iter().map(wire_declaration).collect(),
                }]
            },
        };

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let reply: GenerateContentResponse = response.json().await?;
        reply_from_response(reply)
    }
}

/// Map a provider response to the two-variant reply shape.
///
/// Only the first part of the first candidate is considered; anything else
/// the provider sent is dropped here.
fn reply_from_response(response: GenerateContentResponse) -> Result<ModelReply, GatewayError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GatewayError::EmptyReply)?;

    let part = candidate
        .content
        .parts
        .into_iter()
        .next()
        .ok_or(GatewayError::MalformedReply)?;

    if let Some(call) = part.function_call {
        let args = call
            .args
            .into_iter()
            .map(|(name, value)| (name, stringify_arg(value)))
            .collect();
        return Ok(ModelReply::ToolCall {
            name: call.name,
            args,
        });
    }

    if let Some(text) = part.text {
        return Ok(ModelReply::Text(text));
    }

    Err(GatewayError::MalformedReply)
}

/// Declared schemas are all-string, but coerce defensively anyway.
fn stringify_arg(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn content_from_turn(turn: &Turn) -> WireContent {
    match turn {
        Turn::User(text) => WireContent {
            role: Some("user".to_string()),
            parts: vec![WirePart {
                text: Some(text.clone()),
                ..Default::default()
            }],
        },
        Turn::Model(text) => WireContent {
            role: Some("model".to_string()),
            parts: vec![WirePart {
                text: Some(text.clone()),
                ..Default::default()
            }],
        },
        Turn::ToolRequest { name, args } => WireContent {
            role: Some("model".to_string()),
            parts: vec![WirePart {
                function_call: Some(WireFunctionCall {
                    name: name.clone(),
                    args: args
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect(),
                }),
                ..Default::default()
            }],
        },
        Turn::ToolResult { name, result } => WireContent {
            role: Some("user".to_string()),
            parts: vec![WirePart {
                function_response: Some(WireFunctionResponse {
                    name: name.clone(),
                    response: json!({ "result": result }),
                }),
                ..Default::default()
            }],
        },
    }
}

fn wire_declaration(declaration: &ToolDeclaration) -> WireFunctionDeclaration {
    let properties: serde_json::Map<String, Value> = declaration
        .params
        .iter()
        .map(|param| {
            (
                param.name.to_string(),
                json!({ "type": "string", "description": param.description }),
            )
        })
        .collect();
    let required: Vec<&str> = declaration.params.iter().map(|p| p.name).collect();

    WireFunctionDeclaration {
        name: declaration.name.clone(),
        description: declaration.description.clone(),
        parameters: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

// Wire types for the generateContent protocol.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireToolSet>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireToolSet {
    function_declarations: Vec<WireFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct WireFunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: WireContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn text_reply_maps_to_text() {
        let response = response_from(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "42" }] } }]
        }));
        assert_eq!(
            reply_from_response(response).unwrap(),
            ModelReply::Text("42".to_string())
        );
    }

    #[test]
    fn function_call_maps_to_tool_call_with_string_args() {
        let response = response_from(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{
                "functionCall": {
                    "name": "perform_calculation",
                    "args": { "value_one": "2", "value_two": 2.5, "operator": "*" }
                }
            }] } }]
        }));
        let reply = reply_from_response(response).unwrap();
        match reply {
            ModelReply::ToolCall { name, args } => {
                assert_eq!(name, "perform_calculation");
                assert_eq!(args["value_one"], "2");
                // Non-string args are coerced at the boundary.
                assert_eq!(args["value_two"], "2.5");
                assert_eq!(args["operator"], "*");
            }
            other => panic!("expected tool call, got {:?}", other),
        }
    }

    #[test]
    fn only_first_part_of_first_candidate_counts() {
        let response = response_from(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [
                    { "text": "first" },
                    { "text": "second" }
                ] } },
                { "content": { "role": "model", "parts": [{ "text": "other candidate" }] } }
            ]
        }));
        assert_eq!(
            reply_from_response(response).unwrap(),
            ModelReply::Text("first".to_string())
        );
    }

    #[test]
    fn no_candidates_is_empty_reply() {
        let response = response_from(json!({ "candidates": [] }));
        assert!(matches!(
            reply_from_response(response),
            Err(GatewayError::EmptyReply)
        ));
    }

    #[test]
    fn unrecognized_part_shape_fails_fast() {
        let response = response_from(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{}] } }]
        }));
        assert!(matches!(
            reply_from_response(response),
            Err(GatewayError::MalformedReply)
        ));
    }

    #[test]
    fn tool_result_turn_becomes_function_response() {
        let turn = Turn::ToolResult {
            name: "perform_calculation".to_string(),
            result: "5".to_string(),
        };
        let content = content_from_turn(&turn);
        assert_eq!(content.role.as_deref(), Some("user"));
        let response = content.parts[0].function_response.as_ref().unwrap();
        assert_eq!(response.name, "perform_calculation");
        assert_eq!(response.response, json!({ "result": "5" }));
    }

    #[test]
    fn declaration_schema_is_all_string_object() {
        let declaration = ToolDeclaration {
            name: "perform_calculation".to_string(),
            description: "calculate".to_string(),
            params: vec![crate::tools::ParamSpec {
                name: "value_one",
                description: "first value",
            }],
        };
        let wire = wire_declaration(&declaration);
        assert_eq!(
            wire.parameters,
            json!({
                "type": "object",
                "properties": {
                    "value_one": { "type": "string", "description": "first value" }
                },
                "required": ["value_one"],
            })
        );
    }
}
