//! Hierarchical key helpers shared by the read and write paths.

pub const SEPARATOR: char = '/';

/// Join segments into one key. Separators at the seams collapse and empty
/// segments are dropped; a leading separator on the first segment is kept.
pub fn compose_key<S: AsRef<str>>(segments: &[S]) -> String {
    let mut key = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        if i == 0 && segment.starts_with(SEPARATOR) {
            key.push(SEPARATOR);
        }

        let trimmed = segment.trim_matches(SEPARATOR);
        if trimmed.is_empty() {
            continue;
        }

        if !key.is_empty() && !key.ends_with(SEPARATOR) {
            key.push(SEPARATOR);
        }
        key.push_str(trimmed);
    }
    key
}

/// Final segment of a key, ignoring trailing separators.
pub fn leaf_segment(key: &str) -> &str {
    let trimmed = key.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_key() {
        assert_eq!(compose_key(&["a", "b", "c"]), "a/b/c");
        assert_eq!(
            compose_key(&["/hwinv/nodes/", "/node-1", "cpu/"]),
            "/hwinv/nodes/node-1/cpu"
        );
        assert_eq!(compose_key(&["/root", "", "x"]), "/root/x");
    }

    #[test]
    fn test_leaf_segment_inverts_compose() {
        assert_eq!(leaf_segment(&compose_key(&["a", "b", "c"])), "c");
        assert_eq!(leaf_segment(&compose_key(&["/hwinv", "node-7"])), "node-7");
        assert_eq!(leaf_segment("single"), "single");
        assert_eq!(leaf_segment("/a/b/"), "b");
    }
}
