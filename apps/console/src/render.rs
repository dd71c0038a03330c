//! Reply rendering.

use gateway_console_core::{GatewayEvent, GatewayReply};
use gateway_console_transport::WsFrame;
use serde_json::Value;

/// Print one normalized reply.
pub fn reply(reply: &GatewayReply) {
    match reply {
        GatewayReply::Error { message } => println!("error: {message}"),
        GatewayReply::Scalar { value } => {
            println!("gateway: {}", scalar_display(value));
        }
        GatewayReply::Structured {
            content: Some(content),
            ..
        } => {
            println!();
            println!("{content}");
        }
        GatewayReply::Structured { fields, .. } => {
            println!("{}", pretty(&Value::Object(fields.clone())));
        }
        GatewayReply::EventBatch {
            conversation_id,
            status,
            events,
        } => {
            println!("conversation: {conversation_id}");
            println!("status: {status}");
            println!("events: {}", events.len());
            for item in events {
                event(item);
            }
        }
        GatewayReply::Raw { body } => println!("{}", pretty(body)),
    }
}

/// Print one decoded WebSocket frame.
pub fn ws_frame(frame: &WsFrame) {
    match frame {
        WsFrame::Json(value) => {
            println!("gateway:");
            println!("{}", pretty(value));
        }
        WsFrame::Text(text) => println!("gateway: {text}"),
    }
}

fn event(event: &GatewayEvent) {
    match event {
        GatewayEvent::AssistantMessage { content } => println!("assistant: {content}"),
        GatewayEvent::ToolUse { tool_name } => println!("tool: {tool_name}"),
        GatewayEvent::Error { message } => println!("error: {message}"),
        // Forward compatibility: kinds this client does not know yet.
        GatewayEvent::Other { kind, .. } => println!("[{kind}]"),
    }
}

fn scalar_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
