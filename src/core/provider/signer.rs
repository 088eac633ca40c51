//! Compact JWS signing.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

use crate::core::algorithm::JwsAlgorithm;
use crate::core::provider::{KeyMaterial, es512, provider_error};
use crate::error::JwtLensError;

/// Sign `payload` and return a compact token.
///
/// `header` supplies extra header fields and must be a JSON object when
/// present. `alg` is always set to `algorithm`; `typ` defaults to `JWT`.
///
/// # Errors
///
/// Returns an error if the header is not an object, the key does not fit
/// the algorithm, or the provider fails to sign.
pub fn sign(
    payload: &Value,
    header: Option<&Value>,
    key: &KeyMaterial,
    algorithm: JwsAlgorithm,
) -> Result<String, JwtLensError> {
    key.check_family(algorithm)?;

    let header = build_header(header, algorithm)?;
    let header_segment = encode_segment(&header)?;
    let payload_segment = encode_segment(payload)?;
    let signing_input = format!("{header_segment}.{payload_segment}");

    let signature = match algorithm.to_jsonwebtoken() {
        Some(alg) => {
            let encoding_key = key.encoding_key(algorithm)?;
            jsonwebtoken::crypto::sign(signing_input.as_bytes(), &encoding_key, alg)
                .map_err(provider_error)?
        }
        None => es512::sign(signing_input.as_bytes(), key.as_bytes())?,
    };

    tracing::debug!(%algorithm, "signed token");
    Ok(format!("{signing_input}.{signature}"))
}

fn build_header(extra: Option<&Value>, algorithm: JwsAlgorithm) -> Result<Value, JwtLensError> {
    let mut header = match extra {
        None => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(JwtLensError::InvalidJsonArgument {
                argument: "--header",
                reason: "header must be a JSON object".to_string(),
            });
        }
    };
    header.insert("alg".to_string(), Value::from(algorithm.as_str()));
    header
        .entry("typ")
        .or_insert_with(|| Value::from("JWT"));
    Ok(Value::Object(header))
}

fn encode_segment(value: &Value) -> Result<String, JwtLensError> {
    let bytes = serde_json::to_vec(value).map_err(|e| JwtLensError::Provider {
        reason: format!("failed to serialize JSON: {e}"),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
