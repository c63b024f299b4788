use serde_json::{Map, Value};

/// Builds the JSON forwarded to the inference server's language model from
/// whatever the browser sent. Unparsable bodies forward `{}` and a missing
/// `temperature` is simply left out.
pub fn forwarded_language_payload(body: &[u8], forward_number_to_generate: bool) -> Value {
    let received: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let mut forwarded = Map::new();
    if let Some(temperature) = received.get("temperature") {
        forwarded.insert("temperature".to_string(), temperature.clone());
    }
    if forward_number_to_generate {
        if let Some(number) = received.get("number_to_generate") {
            forwarded.insert("number_to_generate".to_string(), number.clone());
        }
    }

    Value::Object(forwarded)
}
