use pathfinding::kuhn_munkres::{kuhn_munkres, Weights};

use super::SlotMatching;

/// Whether every member of `left` finds an equal member of `right`.
///
/// With [`SlotMatching::Loose`] a right member may be reused; with
/// [`SlotMatching::Bijective`] the members must pair up one-to-one.
pub(crate) fn all_matched<T>(
    left: &[T],
    right: &[T],
    matching: SlotMatching,
    mut equal: impl FnMut(&T, &T) -> bool,
) -> bool {
    match matching {
        SlotMatching::Loose => left.iter().all(|l| right.iter().any(|r| equal(l, r))),
        SlotMatching::Bijective => {
            if left.len() != right.len() {
                return false;
            }
            if left.is_empty() {
                return true;
            }
            let data: Vec<Vec<i64>> = left
                .iter()
                .map(|l| right.iter().map(|r| i64::from(equal(l, r))).collect())
                .collect();
            let (matched, _) = kuhn_munkres(&SquareMatrix::new(data));
            matched == left.len() as i64
        }
    }
}

/// 0/1 equality matrix for pathfinding's assignment solver.
struct SquareMatrix {
    data: Vec<Vec<i64>>,
    size: usize,
}

impl SquareMatrix {
    fn new(data: Vec<Vec<i64>>) -> Self {
        let size = data.len();
        Self { data, size }
    }
}

impl Weights<i64> for SquareMatrix {
    fn rows(&self) -> usize {
        self.size
    }

    fn columns(&self) -> usize {
        self.size
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.data[row][col]
    }

    fn neg(&self) -> Self {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&v| -v).collect())
            .collect();
        Self {
            data,
            size: self.size,
        }
    }
}
