use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::ModelId;

/// Parameters for an image generation call. Unset options are left out of
/// the outbound payload so the upstream defaults apply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct ImageRequest {
    #[setters(skip)]
    pub model: ModelId,
    #[setters(skip)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<f64>,
}

impl ImageRequest {
    pub fn new(model: impl Into<ModelId>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            negative_prompt: None,
            width: None,
            height: None,
            steps: None,
            guidance: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct VideoRequest {
    #[setters(skip)]
    pub model: ModelId,
    #[setters(skip)]
    pub prompt: String,
    /// Clip length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Resolution such as `1024x576`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl VideoRequest {
    pub fn new(model: impl Into<ModelId>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            duration: None,
            size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_image_request_omits_unset_fields() {
        let fixture = ImageRequest::new("demo", "a portrait");
        let actual = serde_json::to_value(&fixture).unwrap();
        let expected = json!({"model": "demo", "prompt": "a portrait"});
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_image_request_includes_supplied_fields() {
        let fixture = ImageRequest::new("demo", "a portrait")
            .negative_prompt("blurry")
            .width(768u32)
            .steps(30u32)
            .guidance(7.5);
        let actual = serde_json::to_value(&fixture).unwrap();
        let expected = json!({
            "model": "demo",
            "prompt": "a portrait",
            "negative_prompt": "blurry",
            "width": 768,
            "steps": 30,
            "guidance": 7.5
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_video_request_omits_unset_fields() {
        let fixture = VideoRequest::new("demo", "waves").size("1024x576");
        let actual = serde_json::to_value(&fixture).unwrap();
        let expected = json!({"model": "demo", "prompt": "waves", "size": "1024x576"});
        assert_eq!(actual, expected);
    }
}
