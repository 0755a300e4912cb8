/// Returns true if the byte prefix contains a NUL byte anywhere.
///
/// Empty input is never binary.
pub fn looks_binary(content: &[u8]) -> bool {
    content.contains(&0)
}
