use std::collections::HashMap;

/// Heap arena backing addresses at and above program space.
///
/// Allocations are carved out of one growable arena: a first-fit scan of
/// the free list, falling back to extending the arena. `release` only
/// accepts offsets that are currently live, so a double free or a free of
/// a foreign address is reported instead of corrupting the bookkeeping.
/// Reads and writes stay valid for any offset inside the arena, freed or
/// not.
pub(crate) struct Heap {
    arena: Vec<u8>,
    live: HashMap<usize, usize>,
    free: Vec<(usize, usize)>,
}

impl Heap {
    pub(crate) fn new() -> Heap {
        Heap {
            arena: Vec::new(),
            live: HashMap::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, size: usize) -> usize {
        // Zero-sized allocations still get a distinct, freeable address.
        let size = size.max(1);

        for i in 0..self.free.len() {
            let (offset, capacity) = self.free[i];
            if capacity >= size {
                if capacity == size {
                    self.free.remove(i);
                } else {
                    self.free[i] = (offset + size, capacity - size);
                }
                self.live.insert(offset, size);
                return offset;
            }
        }

        let offset = self.arena.len();
        self.arena.resize(offset + size, 0);
        self.live.insert(offset, size);
        offset
    }

    pub(crate) fn release(&mut self, offset: usize) -> Result<(), ()> {
        let size = self.live.remove(&offset).ok_or(())?;
        self.free.push((offset, size));
        Ok(())
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Result<&[u8], ()> {
        let end = offset.checked_add(len).ok_or(())?;
        if end <= self.arena.len() {
            Ok(&self.arena[offset..end])
        } else {
            Err(())
        }
    }

    pub(crate) fn slice_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8], ()> {
        let end = offset.checked_add(len).ok_or(())?;
        if end <= self.arena.len() {
            Ok(&mut self.arena[offset..end])
        } else {
            Err(())
        }
    }
}

#[test]
fn alloc_grows_the_arena() {
    let mut heap = Heap::new();
    let first = heap.alloc(16);
    let second = heap.alloc(8);
    assert_eq!(first, 0);
    assert_eq!(second, 16);
    assert_eq!(heap.slice(0, 24).unwrap().len(), 24);
}

#[test]
fn release_and_reuse() {
    let mut heap = Heap::new();
    let first = heap.alloc(16);
    let second = heap.alloc(16);
    assert_eq!(heap.release(first), Ok(()));
    // The freed block satisfies the next fitting request.
    assert_eq!(heap.alloc(16), first);
    assert_eq!(heap.release(second), Ok(()));
}

#[test]
fn release_splits_oversized_blocks() {
    let mut heap = Heap::new();
    let first = heap.alloc(16);
    assert_eq!(heap.release(first), Ok(()));
    assert_eq!(heap.alloc(4), first);
    assert_eq!(heap.alloc(12), first + 4);
}

#[test]
fn double_release_is_rejected() {
    let mut heap = Heap::new();
    let offset = heap.alloc(8);
    assert_eq!(heap.release(offset), Ok(()));
    assert_eq!(heap.release(offset), Err(()));
}

#[test]
fn foreign_release_is_rejected() {
    let mut heap = Heap::new();
    heap.alloc(8);
    assert_eq!(heap.release(3), Err(()));
}

#[test]
fn out_of_range_slice_is_rejected() {
    let mut heap = Heap::new();
    heap.alloc(8);
    assert!(heap.slice(0, 8).is_ok());
    assert!(heap.slice(4, 8).is_err());
}
