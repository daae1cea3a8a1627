//! Buffer parsing helpers for the wire protocol.

use bytes::BytesMut;

use crate::error::{StoreError, StoreResult};

/// Split a request buffer into whitespace-separated words.
///
/// Consumes the buffer. Quoting and escaping are not supported; the
/// protocol keeps keys and field names whitespace-free.
///
/// # Example
/// ```
/// use bytes::BytesMut;
/// use session_store::buffer_to_array;
///
/// let mut buf = BytesMut::from("update abc123 website example.org");
/// let parts = buffer_to_array(&mut buf);
/// assert_eq!(parts, vec!["update", "abc123", "website", "example.org"]);
/// ```
pub fn buffer_to_array(buf: &mut BytesMut) -> Vec<String> {
    let bytes = buf.split().freeze();
    String::from_utf8_lossy(&bytes)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Parse a buffer into command parts, rejecting empty requests.
pub fn parse_command(buf: &mut BytesMut) -> StoreResult<Vec<String>> {
    let parts = buffer_to_array(buf);

    if parts.is_empty() {
        return Err(StoreError::ParseError("empty command".to_string()));
    }

    Ok(parts)
}
