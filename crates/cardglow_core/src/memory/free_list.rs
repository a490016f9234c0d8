//! # Index Free-List
//!
//! Tracks which slots of a fixed-size pool are free. The owner keeps the
//! actual objects in its own array and uses the free-list only to find a free
//! slot in O(1) instead of scanning for the first inactive one.

/// Free-list over slot indices `0..capacity`.
///
/// Acquisition hands out the lowest never-used indices first; released
/// indices are reused most-recent-first.
#[derive(Debug, Clone)]
pub struct FreeList {
    /// Indices of free slots (top of stack = next handed out).
    free: Vec<usize>,
    /// Whether each slot is currently held.
    in_use: Vec<bool>,
}

impl FreeList {
    /// Creates a free-list with every slot free.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            free: (0..capacity).rev().collect(),
            in_use: vec![false; capacity],
        }
    }

    /// Total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.in_use.len()
    }

    /// Number of held slots.
    #[inline]
    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.capacity() - self.free.len()
    }

    /// Takes a free slot, or `None` if every slot is held.
    pub fn acquire(&mut self) -> Option<usize> {
        let index = self.free.pop()?;
        self.in_use[index] = true;
        Some(index)
    }

    /// Returns a slot to the free-list.
    ///
    /// Returns false (and changes nothing) for out-of-range or already free
    /// indices.
    pub fn release(&mut self, index: usize) -> bool {
        match self.in_use.get_mut(index) {
            Some(held) if *held => {
                *held = false;
                self.free.push(index);
                true
            }
            _ => false,
        }
    }

    /// Frees every slot.
    pub fn clear(&mut self) {
        self.in_use.iter_mut().for_each(|held| *held = false);
        self.free.clear();
        self.free.extend((0..self.capacity()).rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_until_full() {
        let mut list = FreeList::new(2);
        assert_eq!(list.acquire(), Some(0));
        assert_eq!(list.acquire(), Some(1));
        assert_eq!(list.acquire(), None);
        assert_eq!(list.in_use_count(), 2);
    }

    #[test]
    fn test_release_reuses_slot() {
        let mut list = FreeList::new(3);
        let a = list.acquire().unwrap();
        let _b = list.acquire().unwrap();
        assert!(list.release(a));
        assert_eq!(list.acquire(), Some(a));
    }

    #[test]
    fn test_double_release_is_rejected() {
        let mut list = FreeList::new(1);
        let slot = list.acquire().unwrap();
        assert!(list.release(slot));
        assert!(!list.release(slot));
        assert!(!list.release(7));
        assert_eq!(list.in_use_count(), 0);
    }

    #[test]
    fn test_zero_capacity() {
        let mut list = FreeList::new(0);
        assert_eq!(list.acquire(), None);
        list.clear();
        assert_eq!(list.capacity(), 0);
    }
}
