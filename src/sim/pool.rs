//! Fixed-capacity entity pools
//!
//! Every slot is preallocated; visibility is the liveness flag. Slots keep
//! stable indices for the lifetime of the pool.

use super::object::GameObject;

/// Preallocated set of reusable objects
#[derive(Debug)]
pub struct Pool {
    slots: Vec<GameObject>,
}

impl Pool {
    /// Create `capacity` hidden objects of the given size
    pub fn new(capacity: usize, width: f32, height: f32) -> Self {
        Self {
            slots: (0..capacity)
                .map(|_| GameObject::hidden(width, height))
                .collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently in flight
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.visible()).count()
    }

    /// Claim the lowest free slot, marking it visible.
    ///
    /// Returns `None` when every slot is in flight.
    pub fn acquire(&mut self) -> Option<usize> {
        let index = self.slots.iter().position(|s| !s.visible())?;
        self.slots[index].set_visible(true);
        Some(index)
    }

    /// Return a slot to the pool. Releasing a free slot is a no-op.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.reset();
        }
    }

    /// Return every slot to the pool
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
    }

    pub fn get(&self, index: usize) -> Option<&GameObject> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut GameObject> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.slots.iter_mut()
    }

    /// Indices of slots currently in flight
    pub fn active_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible())
            .map(|(i, _)| i)
            .collect()
    }
}
