//! Payload codec
//!
//! Applies a [`PayloadEncoding`] to request and response bodies. Base64 uses
//! the standard alphabet with padding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::domain::submission::PayloadEncoding;

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input was declared base64 but is not
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Decode an inbound payload according to its declared encoding
///
/// ASCII whitespace is ignored for base64 input so line-wrapped output from
/// common tools decodes cleanly.
pub fn decode(payload: &[u8], encoding: PayloadEncoding) -> Result<Vec<u8>, CodecError> {
    match encoding {
        PayloadEncoding::Plain => Ok(payload.to_vec()),
        PayloadEncoding::Base64 => {
            let compact: Vec<u8> = payload
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            Ok(STANDARD.decode(compact)?)
        }
    }
}

/// Encode an outbound payload according to the requested encoding
pub fn encode(payload: &[u8], encoding: PayloadEncoding) -> Vec<u8> {
    match encoding {
        PayloadEncoding::Plain => payload.to_vec(),
        PayloadEncoding::Base64 => STANDARD.encode(payload).into_bytes(),
    }
}
