use std::collections::HashMap;

/// Read access to a string <-> id table.
pub trait StringTable {
    fn to_str(&self, id: usize) -> Option<&str>;
    fn to_id(&self, s: &str) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait TextVectorizer {
    fn find_or_insert(&mut self, key: &str) -> usize;
}

/// Interned strings with dense ids assigned in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Quark {
    v: Vec<String>,
    m: HashMap<String, usize>,
}

impl<S: AsRef<str>> FromIterator<S> for Quark {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut quark = Quark::default();
        for s in iter {
            quark.find_or_insert(s.as_ref());
        }
        quark
    }
}

impl StringTable for Quark {
    fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    fn to_id(&self, s: &str) -> Option<usize> {
        self.m.get(s).copied()
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl TextVectorizer for Quark {
    fn find_or_insert(&mut self, key: &str) -> usize {
        if let Some(&id) = self.m.get(key) {
            return id;
        }
        let id = self.v.len();
        self.m.insert(key.to_string(), id);
        self.v.push(key.to_string());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_str() {
        let mut quark = Quark::default();
        for (s, id) in [("NN", 0), ("DT", 1), ("VBD", 2), ("DT", 1), ("NN", 0), ("JJ", 3)] {
            assert_eq!(id, quark.find_or_insert(s), "{} != {}", s, id);
        }
        assert_eq!(quark.len(), 4);
    }

    #[test]
    fn find_by_id() {
        let quark: Quark = ["DT", "NN"].into_iter().collect();
        assert_eq!(quark.to_str(0), Some("DT"));
        assert_eq!(quark.to_str(1), Some("NN"));
        assert_eq!(quark.to_str(2), None);
        assert_eq!(quark.to_id("NN"), Some(1));
        assert_eq!(quark.to_id("VB"), None);
    }

    #[test]
    fn collect_keeps_insertion_order() {
        let quark: Quark = ["b", "a", "b", "c"].into_iter().collect();
        assert_eq!(quark.len(), 3);
        let v: Vec<_> = (0..quark.len()).filter_map(|id| quark.to_str(id)).collect();
        assert_eq!(v, ["b", "a", "c"]);
    }
}
