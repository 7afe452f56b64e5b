//! Parsing the model CLI's JSON envelope.

use serde::Deserialize;

use crate::error::ReviewError;

/// Envelope printed by the model CLI with `--output-format=json`.
#[derive(Debug, Deserialize)]
struct ModelEnvelope {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the suggested message from the model's stdout.
///
/// The text of `response` is returned verbatim. A missing or null
/// `response` is an error; nothing else about the text is checked.
pub fn parse_model_response(stdout: &str) -> Result<String, ReviewError> {
    let envelope = parse_envelope(stdout)?;

    match envelope.response {
        Some(response) => Ok(response),
        None => Err(ReviewError::MissingResponse(
            envelope.error.and_then(|e| e.message),
        )),
    }
}

/// Parse the envelope, skipping any banner text the CLI printed before it.
fn parse_envelope(stdout: &str) -> Result<ModelEnvelope, ReviewError> {
    let first_error = match serde_json::from_str::<ModelEnvelope>(stdout) {
        Ok(envelope) => return Ok(envelope),
        Err(e) => e,
    };

    // serde_json stops at the end of the first complete value, so trailing
    // text after the object is ignored here.
    for (start_idx, _) in stdout.match_indices('{') {
        let mut values =
            serde_json::Deserializer::from_str(&stdout[start_idx..]).into_iter::<ModelEnvelope>();
        // Only an object carrying one of the envelope's own fields counts;
        // nested objects such as `stats` would otherwise match.
        match values.next() {
            Some(Ok(envelope)) if envelope.response.is_some() || envelope.error.is_some() => {
                return Ok(envelope);
            }
            _ => {}
        }
    }

    Err(ReviewError::InvalidJson(format!(
        "Failed to parse: {}. Content: {}",
        first_error,
        stdout.trim()
    )))
}
