use std::cmp::Ordering;

/// Which end of the ordering [`PriorityHeap::extract_top`] yields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeapKind {
    Min,
    Max,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    item: T,
    seq: u64,
}

/// An array-backed binary heap, min- or max-ordered.
///
/// Items that compare equal leave in insertion order, so identical input
/// sequences always produce identical output sequences. Insert and extract
/// are O(log n) via sift-up / sift-down.
#[derive(Clone, Debug)]
pub struct PriorityHeap<T: Ord> {
    kind: HeapKind,
    slots: Vec<Slot<T>>,
    next_seq: u64,
}

impl<T: Ord> PriorityHeap<T> {
    pub fn new(kind: HeapKind) -> Self {
        Self::with_capacity(kind, 0)
    }

    pub fn with_capacity(kind: HeapKind, capacity: usize) -> Self {
        Self { kind, slots: Vec::with_capacity(capacity), next_seq: 0 }
    }

    pub fn min() -> Self {
        Self::new(HeapKind::Min)
    }

    pub fn max() -> Self {
        Self::new(HeapKind::Max)
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn insert(&mut self, item: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.slots.push(Slot { item, seq });
        self.sift_up(self.slots.len() - 1);
    }

    /// Remove and return the top item (smallest for `Min`, largest for `Max`).
    pub fn extract_top(&mut self) -> Option<T> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self.slots.len() - 1;
        self.slots.swap(0, last);
        let top = self.slots.pop().map(|s| s.item);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        top
    }

    pub fn peek(&self) -> Option<&T> {
        self.slots.first().map(|s| &s.item)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_seq = 0;
    }

    /// Drain into a vector in extraction order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.slots.len());
        while let Some(item) = self.extract_top() {
            out.push(item);
        }
        out
    }

    /// True when slot `a` must sit above slot `b`.
    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        let (sa, sb) = (&self.slots[a], &self.slots[b]);
        let ord = match self.kind {
            HeapKind::Min => sa.item.cmp(&sb.item),
            HeapKind::Max => sb.item.cmp(&sa.item),
        };
        match ord {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => sa.seq < sb.seq,
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.outranks(i, parent) {
                break;
            }
            self.slots.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.slots.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;
            if left < n && self.outranks(left, best) {
                best = left;
            }
            if right < n && self.outranks(right, best) {
                best = right;
            }
            if best == i {
                break;
            }
            self.slots.swap(i, best);
            i = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_heap_extracts_ascending() {
        let mut h = PriorityHeap::min();
        for v in [5, 1, 9, 3, 7, 2] {
            h.insert(v);
        }
        assert_eq!(h.len(), 6);
        assert_eq!(h.peek(), Some(&1));
        assert_eq!(h.into_sorted_vec(), vec![1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn max_heap_extracts_descending() {
        let mut h = PriorityHeap::max();
        for v in [5, 1, 9, 3, 7, 2] {
            h.insert(v);
        }
        assert_eq!(h.extract_top(), Some(9));
        assert_eq!(h.extract_top(), Some(7));
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn empty_heap_yields_none() {
        let mut h: PriorityHeap<u32> = PriorityHeap::min();
        assert!(h.is_empty());
        assert_eq!(h.peek(), None);
        assert_eq!(h.extract_top(), None);
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Keyed(u32, &'static str);

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    #[test]
    fn ties_leave_in_insertion_order() {
        for kind in [HeapKind::Min, HeapKind::Max] {
            let mut h = PriorityHeap::new(kind);
            h.insert(Keyed(4, "a"));
            h.insert(Keyed(4, "b"));
            h.insert(Keyed(4, "c"));
            h.insert(Keyed(4, "d"));
            let names: Vec<&str> = h.into_sorted_vec().into_iter().map(|k| k.1).collect();
            assert_eq!(names, vec!["a", "b", "c", "d"], "{kind:?}");
        }
    }

    #[test]
    fn interleaved_insert_and_extract_keep_invariant() {
        let mut h = PriorityHeap::min();
        let mut out = Vec::new();
        // Deterministic pseudo-random sequence
        let mut v: u32 = 17;
        for round in 0..200 {
            v = v.wrapping_mul(1_103_515_245).wrapping_add(12_345) % 1000;
            h.insert(v);
            if round % 3 == 2 {
                out.push(h.extract_top().unwrap());
            }
        }
        let rest = h.into_sorted_vec();
        assert!(rest.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(out.len(), 66);
    }

    #[test]
    fn clear_resets() {
        let mut h = PriorityHeap::max();
        h.insert(1);
        h.insert(2);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.kind(), HeapKind::Max);
    }
}
