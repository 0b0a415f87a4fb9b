//! Line-oriented cleanup that isolates the first top-level JSON object.

use super::scanner::{first_object_end, strip_trailing_commas};

/// Returned when no object can be found at all.
pub const EMPTY_OBJECT: &[u8] = b"{}";

/// Isolate the first balanced top-level object in `data`.
///
/// Line endings are normalised and each line is trimmed, with blank lines
/// dropped. The text from the first `{` up to its matching `}` is kept and
/// anything after it is discarded; a truncated object is kept to the end of
/// the input. Commas directly before `}` or `]` are then removed.
///
/// Never fails: input without any `{` yields [`EMPTY_OBJECT`].
pub fn sanitize(data: &[u8]) -> Vec<u8> {
    let lines: Vec<&[u8]> = data
        .split(|&b| b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .collect();
    let joined = lines.join(&b'\n');

    let Some(start) = joined.iter().position(|&b| b == b'{') else {
        return EMPTY_OBJECT.to_vec();
    };
    let body = &joined[start..];
    let end = first_object_end(body).unwrap_or(body.len());

    strip_trailing_commas(&body[..end]).trim_ascii().to_vec()
}
