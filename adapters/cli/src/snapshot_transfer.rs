use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use cursendus_core::GameSnapshot;

const SNAPSHOT_DOMAIN: &str = "cursendus";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the game identifier and payload.
pub(crate) const SNAPSHOT_HEADER: &str = "cursendus:v1";
/// Delimiter used to separate the prefix, game identifier and payload.
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while encoding or decoding transfer codes.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("transfer code was empty")]
    EmptyPayload,
    /// The encoded snapshot did not contain a version segment.
    #[error("transfer code is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include the payload segment.
    #[error("transfer code is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("transfer prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("transfer version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The identifier in the header disagrees with the payload.
    #[error("transfer code names game '{header}' but carries game '{payload}'")]
    IdMismatch {
        /// Identifier written in the header.
        header: String,
        /// Identifier stored in the payload.
        payload: String,
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode snapshot payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The snapshot could not be converted to or from JSON.
    #[error("could not convert snapshot payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

/// Encodes the snapshot into a single-line string suitable for clipboard transfer.
pub(crate) fn encode(snapshot: &GameSnapshot) -> Result<String, TransferError> {
    let json = serde_json::to_vec(snapshot).map_err(TransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SNAPSHOT_HEADER}:{}:{encoded}", snapshot.id))
}

/// Decodes a snapshot from the provided transfer code.
///
/// The payload never contains the delimiter, so the identifier is everything
/// between the version and the last delimiter.
pub(crate) fn decode(value: &str) -> Result<GameSnapshot, TransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransferError::EmptyPayload);
    }

    let (domain, rest) = trimmed
        .split_once(FIELD_DELIMITER)
        .ok_or(TransferError::MissingVersion)?;
    if domain != SNAPSHOT_DOMAIN {
        return Err(TransferError::InvalidPrefix(domain.to_owned()));
    }

    let (version, rest) = rest
        .split_once(FIELD_DELIMITER)
        .ok_or(TransferError::MissingPayload)?;
    if version != SNAPSHOT_VERSION {
        return Err(TransferError::UnsupportedVersion(version.to_owned()));
    }

    let (id, payload) = rest
        .rsplit_once(FIELD_DELIMITER)
        .ok_or(TransferError::MissingPayload)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(TransferError::InvalidEncoding)?;
    let snapshot: GameSnapshot =
        serde_json::from_slice(&bytes).map_err(TransferError::InvalidPayload)?;

    if snapshot.id.as_str() != id {
        return Err(TransferError::IdMismatch {
            header: id.to_owned(),
            payload: snapshot.id.to_string(),
        });
    }

    Ok(snapshot)
}
