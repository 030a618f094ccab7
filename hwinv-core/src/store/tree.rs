use crate::keypath::{SEPARATOR, compose_key, leaf_segment};

/// One node of a recursively fetched subtree.
///
/// A node with children is a directory. Children keep the order in which the
/// store returned their keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvNode {
    pub key: String,
    pub value: Option<String>,
    pub children: Vec<KvNode>,
}

impl KvNode {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn leaf(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn segment(&self) -> &str {
        leaf_segment(&self.key)
    }

    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Rebuild a tree rooted at `root` from flat `(key, value)` pairs, as a
    /// prefix range over a flat store returns them. Pairs outside `root` are
    /// ignored. Returns `None` when nothing lives at or under `root`.
    pub fn from_pairs<I, K, V>(root: &str, pairs: I) -> Option<KvNode>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let root_key = root.trim_end_matches(SEPARATOR);
        let prefix = format!("{}{}", root_key, SEPARATOR);
        let mut tree = KvNode::new(root_key);
        let mut found = false;

        for (key, value) in pairs {
            let key = key.as_ref();
            if key == root_key {
                tree.value = Some(value.into());
                found = true;
                continue;
            }

            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };

            let segments: Vec<&str> = rest
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .collect();
            if segments.is_empty() {
                continue;
            }

            tree.insert(&segments, value.into());
            found = true;
        }

        found.then_some(tree)
    }

    fn insert(&mut self, segments: &[&str], value: String) {
        let Some((first, rest)) = segments.split_first() else {
            self.value = Some(value);
            return;
        };

        // Sorted input means the match is almost always the newest child.
        let pos = match self
            .children
            .iter()
            .rposition(|child| child.segment() == *first)
        {
            Some(pos) => pos,
            None => {
                self.children
                    .push(KvNode::new(compose_key(&[self.key.as_str(), first])));
                self.children.len() - 1
            }
        };

        self.children[pos].insert(rest, value);
    }
}

/// Distinct immediate child segments of `dir` among `keys`, first-seen order.
pub fn child_segments<'a, I>(dir: &str, keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = format!("{}{}", dir.trim_end_matches(SEPARATOR), SEPARATOR);
    let mut segments: Vec<String> = Vec::new();

    for key in keys {
        let Some(rest) = key.strip_prefix(&prefix) else {
            continue;
        };
        let Some(segment) = rest.split(SEPARATOR).find(|segment| !segment.is_empty()) else {
            continue;
        };
        if !segments.iter().any(|existing| existing == segment) {
            segments.push(segment.to_string());
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_builds_nested_tree() {
        let tree = KvNode::from_pairs(
            "/n/node-1",
            vec![
                ("/n/node-1/cpu/0/bits", "64"),
                ("/n/node-1/cpu/0/speed", "2400.5"),
                ("/n/node-1/cpu/1/bits", "64"),
                ("/n/node-1/ipaddress", "10.0.0.1"),
                ("/n/node-10/ipaddress", "10.0.0.10"),
            ],
        )
        .unwrap();

        assert_eq!(tree.key, "/n/node-1");
        assert_eq!(tree.children.len(), 2);

        let cpu = &tree.children[0];
        assert_eq!(cpu.key, "/n/node-1/cpu");
        assert!(cpu.is_dir());
        assert_eq!(cpu.children.len(), 2);
        assert_eq!(cpu.children[0].segment(), "0");
        assert_eq!(cpu.children[0].children[1].value.as_deref(), Some("2400.5"));

        let ip = &tree.children[1];
        assert!(!ip.is_dir());
        assert_eq!(ip.value.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_from_pairs_nothing_under_root() {
        let pairs: Vec<(&str, &str)> = vec![("/n/other/ipaddress", "x")];
        assert!(KvNode::from_pairs("/n/node-1", pairs).is_none());
    }

    #[test]
    fn test_child_segments_dedups_in_order() {
        let keys = [
            "/n/a/ipaddress",
            "/n/a/cpu/0/bits",
            "/n/b/ipaddress",
            "/n/c",
            "/nx/d",
        ];
        assert_eq!(child_segments("/n", keys), vec!["a", "b", "c"]);
    }
}
