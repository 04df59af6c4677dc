//! Row heights with O(log n) prefix sums.
//!
//! Backed by a Fenwick tree from the `fenwick` crate, plus a plain copy of
//! each height so single-row reads and updates need no tree walks.
//!
//! Coordinates are whole units: the controller rounds every layout height
//! up before storing it, so rows never overlap after rounding.

/// Prefix sums over row heights.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick storage, 0-indexed as the `fenwick::array` functions expect.
    tree: Vec<isize>,
    heights: Vec<usize>,
}

impl HeightIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of row `index`.
    pub fn height(&self, index: usize) -> Option<usize> {
        self.heights.get(index).copied()
    }

    /// Append a row.
    pub fn push(&mut self, height: usize) {
        let index = self.heights.len();
        self.heights.push(height);
        if index >= self.tree.len() {
            // Nodes past the old end cover earlier rows, so they are
            // rebuilt rather than zero-filled.
            self.rebuild(self.tree.len().max(8) * 2);
        } else {
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
    }

    /// Replace the height of row `index`. Returns `false` if out of range.
    pub fn set(&mut self, index: usize, height: usize) -> bool {
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        let delta = height as isize - *slot as isize;
        *slot = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
        true
    }

    /// Replace every height at once.
    pub fn reset(&mut self, heights: impl IntoIterator<Item = usize>) {
        self.heights.clear();
        self.heights.extend(heights);
        self.rebuild(self.heights.len().max(self.tree.len()));
    }

    /// Sum of heights of rows `0..=index`.
    pub fn prefix_sum(&self, index: usize) -> usize {
        if self.heights.is_empty() {
            return 0;
        }
        let index = index.min(self.heights.len() - 1);
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Y of row `index`'s top edge. `offset_of(len())` is the total.
    pub fn offset_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    pub fn total(&self) -> usize {
        match self.heights.len() {
            0 => 0,
            len => self.prefix_sum(len - 1),
        }
    }

    /// Row containing vertical offset `y`, or `None` past the end.
    pub fn row_at(&self, y: usize) -> Option<usize> {
        let (mut left, mut right) = (0, self.heights.len());
        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > y {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        (left < self.heights.len()).then_some(left)
    }

    pub fn clear(&mut self) {
        self.heights.clear();
        self.tree.iter_mut().for_each(|node| *node = 0);
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity.max(self.heights.len()), 0);
        for (index, &height) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn index_of(heights: &[usize]) -> HeightIndex {
        let mut index = HeightIndex::default();
        for &height in heights {
            index.push(height);
        }
        index
    }

    #[test]
    fn empty_index_has_no_rows() {
        let index = HeightIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.total(), 0);
        assert_eq!(index.row_at(0), None);
        assert_eq!(index.offset_of(0), 0);
    }

    #[test]
    fn offsets_are_row_tops() {
        let index = index_of(&[10, 20, 15]);
        assert_eq!(index.offset_of(0), 0);
        assert_eq!(index.offset_of(1), 10);
        assert_eq!(index.offset_of(2), 30);
        assert_eq!(index.offset_of(3), 45);
        assert_eq!(index.total(), 45);
    }

    #[test]
    fn row_at_uses_half_open_ranges() {
        let index = index_of(&[10, 20, 15]);
        assert_eq!(index.row_at(0), Some(0));
        assert_eq!(index.row_at(9), Some(0));
        assert_eq!(index.row_at(10), Some(1));
        assert_eq!(index.row_at(29), Some(1));
        assert_eq!(index.row_at(30), Some(2));
        assert_eq!(index.row_at(45), None);
    }

    #[test]
    fn set_moves_later_rows() {
        let mut index = index_of(&[3, 4, 5]);
        assert!(index.set(1, 10));
        assert_eq!(index.height(1), Some(10));
        assert_eq!(index.offset_of(2), 13);
        assert_eq!(index.total(), 18);
        assert!(!index.set(3, 1));
    }

    #[test]
    fn growth_past_capacity_keeps_sums() {
        let mut index = HeightIndex::with_capacity(2);
        for height in 1..=40 {
            index.push(height);
        }
        assert_eq!(index.total(), (1..=40).sum::<usize>());
        assert_eq!(index.offset_of(20), (1..=20).sum::<usize>());
    }

    #[test]
    fn reset_replaces_everything() {
        let mut index = index_of(&[1, 2, 3]);
        index.reset([7, 7]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.total(), 14);
    }

    #[test]
    fn clear_then_reuse() {
        let mut index = index_of(&[5, 3]);
        index.clear();
        assert_eq!(index.total(), 0);
        index.push(10);
        assert_eq!(index.total(), 10);
    }

    proptest! {
        #[test]
        fn prefix_sums_match_naive(heights in prop::collection::vec(0usize..=100, 1..80)) {
            let index = index_of(&heights);
            let mut expected = 0;
            for (i, &height) in heights.iter().enumerate() {
                expected += height;
                prop_assert_eq!(index.prefix_sum(i), expected);
            }
        }

        #[test]
        fn row_at_contains_offset(heights in prop::collection::vec(1usize..=50, 1..60), target in 0usize..3000) {
            let index = index_of(&heights);
            match index.row_at(target) {
                Some(row) => {
                    prop_assert!(index.offset_of(row) <= target);
                    prop_assert!(target < index.offset_of(row + 1));
                }
                None => prop_assert!(target >= index.total()),
            }
        }

        #[test]
        fn set_then_read_back(
            heights in prop::collection::vec(1usize..=100, 1..50),
            at in 0usize..50,
            height in 0usize..=100,
        ) {
            let mut index = index_of(&heights);
            let changed = index.set(at, height);
            prop_assert_eq!(changed, at < heights.len());
            if changed {
                prop_assert_eq!(index.height(at), Some(height));
                let naive: usize = heights.iter().enumerate()
                    .map(|(i, &h)| if i == at { height } else { h })
                    .sum();
                prop_assert_eq!(index.total(), naive);
            }
        }
    }
}
