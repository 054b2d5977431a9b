use influencer_domain::ModelDescriptor;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<Value>,
}

/// Completion content: a plain string, or ordered chunks as produced by
/// providers that stream tool-augmented output. Chunks are kept loose so one
/// odd entry does not reject the whole list.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Chunks(Vec<Value>),
}

impl MessageContent {
    /// Joins the string `text` of every chunk; chunks without one are skipped.
    fn into_text(self) -> String {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Chunks(chunks) => chunks
                .iter()
                .filter_map(|chunk| chunk.get("text").and_then(Value::as_str))
                .collect(),
        }
    }
}

/// Extracts the text of the first completion choice.
pub(crate) fn completion_text(body: &Value) -> Result<String> {
    let response = ChatCompletionResponse::deserialize(body)
        .map_err(|_| Error::MalformedResponse(format!("Unexpected response payload: {body}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse(format!("No choices in response: {body}")))?;

    let content = choice
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| Error::MalformedResponse(format!("No message in first choice: {body}")))?;

    MessageContent::deserialize(&content)
        .map(MessageContent::into_text)
        .map_err(|_| Error::MalformedResponse(format!("Unsupported message format: {content}")))
}

/// Reads the catalog records under `data`. A missing or mistyped list reads
/// as empty, as do entries that are not objects.
pub(crate) fn model_list(body: Value) -> Vec<ModelDescriptor> {
    let Value::Object(mut fields) = body else {
        warn!("Model list response is not a JSON object; treating catalog as empty");
        return Vec::new();
    };

    match fields.remove("data") {
        Some(Value::Array(items)) => {
            let total = items.len();
            let models: Vec<_> = items
                .into_iter()
                .filter_map(ModelDescriptor::from_value)
                .collect();
            if models.len() < total {
                warn!(skipped = total - models.len(), "Ignoring non-object model records");
            }
            models
        }
        _ => {
            warn!("Model list response has no `data` array; treating catalog as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use influencer_domain::ModelId;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_plain_string_content() {
        let fixture = json!({"choices": [{"message": {"content": "Hi"}}]});
        let actual = completion_text(&fixture).unwrap();
        assert_eq!(actual, "Hi");
    }

    #[test]
    fn test_chunked_content_is_joined_in_order() {
        let fixture = json!({"choices": [{"message": {"content": [
            {"text": "Hel"},
            {"type": "tool_call", "id": "call-1"},
            {"type": "text", "text": "lo"}
        ]}}]});
        let actual = completion_text(&fixture).unwrap();
        assert_eq!(actual, "Hello");
    }

    #[test]
    fn test_chunks_without_string_text_are_skipped() {
        let fixture = json!({"choices": [{"message": {"content": [
            "x",
            {"text": "Hel"},
            {"text": 5},
            null,
            {"text": "lo"}
        ]}}]});
        let actual = completion_text(&fixture).unwrap();
        assert_eq!(actual, "Hello");
    }

    #[test]
    fn test_only_first_choice_is_used() {
        let fixture = json!({"choices": [
            {"message": {"content": "first"}},
            {"message": {"content": "second"}}
        ]});
        let actual = completion_text(&fixture).unwrap();
        assert_eq!(actual, "first");
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        let fixture = json!({"id": "gen-1"});
        let actual = completion_text(&fixture);
        assert!(matches!(actual, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let fixture = json!({"choices": []});
        let actual = completion_text(&fixture);
        assert!(matches!(actual, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_message_is_malformed() {
        let fixture = json!({"choices": [{"finish_reason": "stop"}]});
        let actual = completion_text(&fixture);
        assert!(matches!(actual, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_unrecognized_content_is_malformed() {
        let fixture = json!({"choices": [{"message": {"content": {"text": "Hi"}}}]});
        let actual = completion_text(&fixture);
        assert!(matches!(actual, Err(Error::MalformedResponse(_))));

        let fixture = json!({"choices": [{"message": {"content": null}}]});
        let actual = completion_text(&fixture);
        assert!(matches!(actual, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        let actual = completion_text(&json!(["Hi"]));
        assert!(matches!(actual, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_model_list_reads_data() {
        let fixture = json!({"data": [{"id": "model-a"}, "junk", {"id": "model-b"}]});
        let actual: Vec<_> = model_list(fixture)
            .iter()
            .filter_map(ModelDescriptor::id)
            .collect();
        assert_eq!(actual, vec![ModelId::new("model-a"), ModelId::new("model-b")]);
    }

    #[test]
    fn test_model_list_defaults_to_empty() {
        assert_eq!(model_list(json!({})), Vec::new());
        assert_eq!(model_list(json!({"data": {"id": "model-a"}})), Vec::new());
        assert_eq!(model_list(json!([{"id": "model-a"}])), Vec::new());
    }
}
