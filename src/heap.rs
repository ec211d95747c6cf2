use crate::error::HeapError;

/// A frontier entry: the node and the priority it was queued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapElement<T> {
    pub priority: u32,
    pub node: T,
}

impl<T> HeapElement<T> {
    pub fn new(priority: u32, node: T) -> Self {
        Self { priority, node }
    }
}

/// Array-backed binary min-heap.
///
/// The tree lives in the contiguous prefix of `data`, with
/// `parent(i) = (i - 1) / 2`, `left(i) = 2i + 1` and `right(i) = 2i + 2`.
/// Ordering is by priority only; equal priorities come out in whatever
/// order the tree shape dictates.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    data: Vec<HeapElement<T>>,
    capacity: usize,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T> PriorityQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::ZeroCapacity);
        }
        Ok(Self {
            data: Vec::with_capacity(capacity),
            capacity,
        })
    }

    pub fn insert(&mut self, priority: u32, node: T) {
        if self.data.len() == self.capacity {
            self.grow();
        }
        self.data.push(HeapElement::new(priority, node));
        self.sift_up(self.data.len() - 1);
    }

    pub fn extract_min(&mut self) -> Result<HeapElement<T>, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Empty);
        }
        // swap_remove moves the last element into the root slot
        let head = self.data.swap_remove(0);
        self.sift_down(0);
        Ok(head)
    }

    pub fn peek(&self) -> Option<&HeapElement<T>> {
        self.data.first()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Slots available before the next doubling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn grow(&mut self) {
        self.capacity *= 2;
        self.data.reserve_exact(self.capacity - self.data.len());
    }

    fn priority(&self, idx: usize) -> u32 {
        self.data[idx].priority
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if self.priority(p) <= self.priority(idx) {
                break;
            }
            self.data.swap(idx, p);
            idx = p;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let size = self.data.len();
        loop {
            let mut smallest = idx;
            let l = left(idx);
            let r = right(idx);
            if l < size && self.priority(l) < self.priority(smallest) {
                smallest = l;
            }
            if r < size && self.priority(r) < self.priority(smallest) {
                smallest = r;
            }
            if smallest == idx {
                break;
            }
            self.data.swap(idx, smallest);
            idx = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_heap_property<T>(heap: &PriorityQueue<T>) {
        for i in 1..heap.data.len() {
            assert!(
                heap.priority(parent(i)) <= heap.priority(i),
                "heap property violated at index {}",
                i
            );
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            PriorityQueue::<u32>::new(0).unwrap_err(),
            HeapError::ZeroCapacity
        );
    }

    #[test]
    fn test_extract_from_empty() {
        let mut heap = PriorityQueue::<u32>::new(4).unwrap();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min().unwrap_err(), HeapError::Empty);
    }

    #[test]
    fn test_extracts_in_priority_order() {
        let mut heap = PriorityQueue::new(8).unwrap();
        for (priority, node) in [(5, 'e'), (1, 'a'), (4, 'd'), (2, 'b'), (3, 'c')] {
            heap.insert(priority, node);
        }
        assert_eq!(heap.peek().map(|e| e.node), Some('a'));

        let order: Vec<char> = std::iter::from_fn(|| heap.extract_min().ok())
            .map(|e| e.node)
            .collect();
        assert_eq!(order, vec!['a', 'b', 'c', 'd', 'e']);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_invariant_holds_under_random_operations() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut heap = PriorityQueue::new(3).unwrap();

        for _ in 0..2000 {
            if heap.is_empty() || rng.gen_bool(0.6) {
                heap.insert(rng.gen_range(0..100), ());
            } else {
                heap.extract_min().unwrap();
            }
            assert_heap_property(&heap);
        }
    }

    #[test]
    fn test_random_multiset_is_sorted() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut heap = PriorityQueue::new(16).unwrap();
        let mut expected: Vec<u32> = (0..500).map(|_| rng.gen_range(0..50)).collect();
        for &p in &expected {
            heap.insert(p, p);
        }

        let mut extracted = Vec::with_capacity(expected.len());
        while let Ok(element) = heap.extract_min() {
            assert_eq!(element.priority, element.node);
            extracted.push(element.priority);
        }

        expected.sort_unstable();
        assert_eq!(extracted, expected);
    }

    #[test]
    fn test_growth_keeps_every_element() {
        let mut heap = PriorityQueue::new(2).unwrap();
        for id in 0..37u32 {
            heap.insert(id % 5, id);
        }
        // 2 -> 4 -> 8 -> 16 -> 32 -> 64
        assert_eq!(heap.capacity(), 64);
        assert_eq!(heap.len(), 37);

        let mut ids: Vec<u32> = std::iter::from_fn(|| heap.extract_min().ok())
            .map(|e| e.node)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..37).collect::<Vec<_>>());
        assert_eq!(heap.capacity(), 64);
    }
}
