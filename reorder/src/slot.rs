use alloc::collections::VecDeque;

/// One position in the reorder window.
///
/// Emptiness is carried by the variant, never by a reserved item value, so
/// every `T` (including `T::default()`) can be buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    /// Nothing received for this position yet.
    Empty,
    /// Item waiting for its predecessors.
    Occupied(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> Slot<T> {
    /// Whether an item is held.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// Whether the slot is still waiting for an item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_occupied()
    }

    /// Borrow the held item.
    #[inline]
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Occupied(item) => Some(item),
            Self::Empty => None,
        }
    }

    /// Take the held item, leaving the slot empty.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        core::mem::take(self).into_occupied()
    }

    /// Consume the slot and return the held item.
    #[inline]
    pub fn into_occupied(self) -> Option<T> {
        match self {
            Self::Occupied(item) => Some(item),
            Self::Empty => None,
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(item: Option<T>) -> Self {
        item.map_or(Self::Empty, Self::Occupied)
    }
}

/// Resize a slot store to exactly `desired_len` entries.
///
/// A shorter store is padded with [`Slot::Empty`]; a store already at least
/// `desired_len` long keeps its first `desired_len` entries untouched. No
/// window bound is checked here; callers enforce it before growing.
#[must_use]
pub fn grow<T>(desired_len: usize, mut slots: VecDeque<Slot<T>>) -> VecDeque<Slot<T>> {
    slots.resize_with(desired_len, Slot::default);
    slots
}
