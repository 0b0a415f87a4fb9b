//! Skipping the binary header that may precede the embedded JSON.

/// Return `data` from its first `{` onwards, or `data` itself if it has none.
///
/// Anything after the object is kept; trimming it is [`super::sanitize`]'s job.
pub fn locate(data: &[u8]) -> &[u8] {
    match data.iter().position(|&b| b == b'{') {
        Some(start) => &data[start..],
        None => data,
    }
}
