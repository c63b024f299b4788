//! Request and response shapes exchanged between the browser, the proxy and
//! the inference server. Nothing here outlives a single exchange.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Multipart field carrying the image, both from the browser and towards the inference server.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageModelRequest {
    pub temperature: f64,
    pub number_to_generate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageModelResponse {
    #[serde(rename = "predictedName", default, skip_serializing_if = "Option::is_none")]
    pub predicted_name: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvModelResponse {
    #[serde(rename = "MostLikelyClass")]
    pub most_likely_class: String,
    #[serde(rename = "allProbs")]
    pub all_probs: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An image file as received from a form or multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }
}
