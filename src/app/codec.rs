//! Checksum and size encodings for manifests
//!
//! Storage notifications carry the object checksum as base64 while the
//! manifest carries it as lower-case hex. Sizes arrive as decimal text and
//! are reported in megabytes with a fixed six-digit fraction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::manifest::{BYTES_PER_MEGABYTE, MEGABYTE_PRECISION};
use crate::errors::{CodecError, CodecResult};

/// Convert a base64 checksum into lower-case hex
///
/// # Errors
///
/// Returns `CodecError::Decode` if `checksum` is not valid padded base64.
///
/// # Examples
///
/// ```rust
/// use nifi_notify::app::codec::decode_checksum;
///
/// let hex = decode_checksum("1B2M2Y8AsgTpgAmY7PhCfg==")?;
/// assert_eq!(hex, "d41d8cd98f00b204e9800998ecf8427e");
/// # Ok::<(), nifi_notify::errors::CodecError>(())
/// ```
pub fn decode_checksum(checksum: &str) -> CodecResult<String> {
    let bytes = STANDARD
        .decode(checksum)
        .map_err(|e| CodecError::Decode {
            checksum: checksum.to_string(),
            reason: e.to_string(),
        })?;
    Ok(hex::encode(bytes))
}

/// Convert a raw checksum digest into the base64 form storage notifications use
pub fn encode_checksum(digest: &[u8]) -> String {
    STANDARD.encode(digest)
}

/// Format a byte count as megabytes with exactly six decimal places
///
/// Uses integer arithmetic, so every byte is represented exactly and the
/// output never switches to scientific notation.
///
/// # Errors
///
/// Returns `CodecError::InvalidSize` unless `size_bytes` is a non-empty run
/// of ASCII digits that fits in a `u64`.
///
/// # Examples
///
/// ```rust
/// use nifi_notify::app::codec::format_megabytes;
///
/// assert_eq!(format_megabytes("20")?, "0.000020");
/// assert_eq!(format_megabytes("12004783")?, "12.004783");
/// # Ok::<(), nifi_notify::errors::CodecError>(())
/// ```
pub fn format_megabytes(size_bytes: &str) -> CodecResult<String> {
    let invalid = || CodecError::InvalidSize {
        size: size_bytes.to_string(),
    };

    if size_bytes.is_empty() || !size_bytes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let bytes: u64 = size_bytes.parse().map_err(|_| invalid())?;

    Ok(format!(
        "{}.{:0width$}",
        bytes / BYTES_PER_MEGABYTE,
        bytes % BYTES_PER_MEGABYTE,
        width = MEGABYTE_PRECISION
    ))
}
