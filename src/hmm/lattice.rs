/// A (tag, score) cell of the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node {
    /// Interned tag id.
    pub tag: usize,
    /// Probability of the best path ending here.
    pub score: f64,
    /// Index of the predecessor in the previous column.
    pub back: Option<usize>,
}

/// Index of the maximum, where a later equal value replaces an earlier one.
pub(crate) fn argmax<I>(scores: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in scores.into_iter().enumerate() {
        match best {
            Some((_, max)) if score < max => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Columns of nodes for one sentence. Column 0 holds the start node only.
#[derive(Debug)]
pub(crate) struct Lattice {
    columns: Vec<Vec<Node>>,
}

impl Lattice {
    pub fn new(start: usize) -> Self {
        Self {
            columns: vec![vec![Node {
                tag: start,
                score: 1.0,
                back: None,
            }]],
        }
    }

    pub fn last(&self) -> &[Node] {
        // never empty: the start column is pushed in `new`
        self.columns.last().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn push(&mut self, column: Vec<Node>) {
        self.columns.push(column);
    }

    /// Number of word columns.
    pub fn len(&self) -> usize {
        self.columns.len() - 1
    }

    /// Tag ids of the best path, start node excluded, with its score.
    /// `None` if there are no word columns or the last one is empty.
    pub fn backtrace(&self) -> Option<(Vec<usize>, f64)> {
        if self.len() == 0 {
            return None;
        }
        let (mut i, score) = argmax(self.last().iter().map(|n| n.score))?;
        let mut tags = Vec::with_capacity(self.len());
        for column in self.columns[1..].iter().rev() {
            let node = &column[i];
            tags.push(node.tag);
            i = node.back.unwrap_or(0);
        }
        tags.reverse();
        Some((tags, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(tag: usize, score: f64, back: usize) -> Node {
        Node {
            tag,
            score,
            back: Some(back),
        }
    }

    #[test]
    fn argmax_prefers_later_ties() {
        assert_eq!(argmax([0.1, 0.5, 0.3]), Some((1, 0.5)));
        assert_eq!(argmax([0.5, 0.1, 0.5]), Some((2, 0.5)));
        assert_eq!(argmax([0.0, 0.0]), Some((1, 0.0)));
        assert_eq!(argmax(std::iter::empty()), None);
    }

    #[test]
    fn backtrace_follows_pointers() {
        let mut lattice = Lattice::new(9);
        lattice.push(vec![node(0, 0.2, 0), node(1, 0.4, 0)]);
        lattice.push(vec![node(2, 0.1, 1), node(3, 0.06, 0)]);
        lattice.push(vec![node(4, 0.01, 1), node(5, 0.05, 0)]);
        assert_eq!(lattice.len(), 3);
        let (tags, score) = lattice.backtrace().unwrap();
        assert_eq!(tags, vec![1, 2, 5]);
        assert_eq!(score, 0.05);
    }

    #[test]
    fn backtrace_without_words() {
        let lattice = Lattice::new(0);
        assert_eq!(lattice.len(), 0);
        assert!(lattice.backtrace().is_none());
    }

    #[test]
    fn backtrace_of_empty_column() {
        let mut lattice = Lattice::new(0);
        lattice.push(Vec::new());
        assert!(lattice.backtrace().is_none());
    }
}
