//! Interactive tools exposed via Model Context Protocol
//!
//! Provides the single `current_date` tool. Every successful call answers twice: a text
//! block holding the serialized payload for plain-text clients, and the same fields as
//! structured content for programmatic clients.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::current_date::{get_current_date, CurrentDateResult};
use crate::errors::AppError;
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
};
use crate::AppState;

pub const CURRENT_DATE_TOOL_NAME: &str = "current_date";

/// Takes no arguments. Unknown fields supplied by a caller are ignored.
#[macros::mcp_tool(
    name = "current_date",
    title = "Current Date Tool",
    description = "Return current date/time and weekday (ja-JP)"
)]
#[derive(Debug, Default, Deserialize, Serialize, macros::JsonSchema)]
pub struct CurrentDateTool {}

pub fn build_tools_list() -> Vec<Tool> {
    let mut current_date = CurrentDateTool::tool();
    current_date.output_schema = Some(
        serde_json::from_value(Value::Object(CurrentDateResult::json_schema()))
            .expect("current_date output schema"),
    );

    vec![current_date]
}

pub fn current_date_tool_result(result: &CurrentDateResult) -> Result<CallToolResult, AppError> {
    let text = serde_json::to_string(result)
        .map_err(|err| AppError::internal(format!("current_date serialization: {err}")))?;
    let structured = match serde_json::to_value(result) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(AppError::internal("current_date did not serialize to an object")),
        Err(err) => return Err(AppError::internal(format!("current_date serialization: {err}"))),
    };

    Ok(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error: None,
        meta: None,
        structured_content: Some(structured),
    })
}

pub async fn handle_tools_call(state: &AppState, id: Option<Value>, params: Option<Value>) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let tool_call: CallToolRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    match tool_call.name.as_str() {
        CURRENT_DATE_TOOL_NAME => {
            if serde_json::from_value::<CurrentDateTool>(json!(tool_call
                .arguments
                .unwrap_or_default()))
            .is_err()
            {
                return json_rpc_error(id, -32602, "Invalid params");
            }

            let result = get_current_date(state.clock.as_ref());
            match current_date_tool_result(&result).and_then(|tool_result| {
                serde_json::to_value(tool_result).map_err(|err| {
                    AppError::internal(format!("current_date tool result serialization: {err}"))
                })
            }) {
                Ok(value) => json_rpc_result(id, value),
                Err(err) => app_error_to_json_rpc(id, err),
            }
        }
        _ => json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "tool_not_found",
                "message": "unknown tool name",
                "details": {
                    "name": tool_call.name,
                },
            })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;

    fn state_at(instant: &str) -> AppState {
        AppState::new(
            "test-server",
            Arc::new(FixedClock::new(instant.parse().expect("valid instant"))),
        )
    }

    #[test]
    fn registers_exactly_one_tool() {
        let tools = build_tools_list();
        assert_eq!(tools.len(), 1);

        let tool = serde_json::to_value(&tools[0]).expect("tool serialization");
        assert_eq!(tool["name"], "current_date");
        assert_eq!(tool["title"], "Current Date Tool");
        assert_eq!(
            tool["description"],
            "Return current date/time and weekday (ja-JP)"
        );
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(tool["inputSchema"]["properties"]
            .as_object()
            .map_or(true, |properties| properties.is_empty()));
    }

    #[test]
    fn output_schema_requires_now_and_weekday() {
        let tools = build_tools_list();
        let tool = serde_json::to_value(&tools[0]).expect("tool serialization");
        let schema = &tool["outputSchema"];

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["now"]["type"], "string");
        assert_eq!(schema["properties"]["weekday"]["type"], "string");

        let mut required = schema["required"]
            .as_array()
            .expect("required list")
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>();
        required.sort_unstable();
        assert_eq!(required, vec!["now", "weekday"]);
    }

    #[tokio::test]
    async fn text_and_structured_content_agree() {
        let state = state_at("2024-01-15T03:00:00.000Z");
        let response = handle_tools_call(
            &state,
            Some(json!(7)),
            Some(json!({ "name": "current_date", "arguments": {} })),
        )
        .await;

        assert_eq!(response["id"], 7);
        let result = &response["result"];
        assert_eq!(result["content"][0]["type"], "text");

        let text = result["content"][0]["text"].as_str().expect("text content");
        let from_text: Value = serde_json::from_str(text).expect("text is json");
        assert_eq!(from_text, result["structuredContent"]);
        assert_eq!(
            result["structuredContent"],
            json!({ "now": "2024-01-15T03:00:00.000Z", "weekday": "月曜日" })
        );
    }

    #[tokio::test]
    async fn extra_arguments_do_not_change_output_shape() {
        let state = state_at("2024-12-25T14:30:00.000Z");
        let response = handle_tools_call(
            &state,
            Some(json!(1)),
            Some(json!({
                "name": "current_date",
                "arguments": { "timezone": "America/New_York", "verbose": true }
            })),
        )
        .await;

        let structured = response["result"]["structuredContent"]
            .as_object()
            .expect("structured content");
        assert_eq!(structured.len(), 2);
        assert_eq!(structured["now"], "2024-12-25T14:30:00.000Z");
        assert_eq!(structured["weekday"], "水曜日");
    }

    #[tokio::test]
    async fn missing_arguments_are_accepted() {
        let state = state_at("2024-01-15T03:00:00.000Z");
        let response = handle_tools_call(
            &state,
            Some(json!(2)),
            Some(json!({ "name": "current_date" })),
        )
        .await;

        assert_eq!(response["result"]["structuredContent"]["weekday"], "月曜日");
    }

    #[tokio::test]
    async fn unknown_tool_is_method_not_found() {
        let state = state_at("2024-01-15T03:00:00.000Z");
        let response = handle_tools_call(
            &state,
            Some(json!(3)),
            Some(json!({ "name": "list_services", "arguments": {} })),
        )
        .await;

        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["data"]["code"], "tool_not_found");
        assert_eq!(response["error"]["data"]["details"]["name"], "list_services");
    }

    #[tokio::test]
    async fn missing_params_are_invalid() {
        let state = state_at("2024-01-15T03:00:00.000Z");
        let response = handle_tools_call(&state, Some(json!(4)), None).await;

        assert_eq!(response["error"]["code"], -32602);
    }
}
