use alloc::vec::Vec;

/// A gap-free batch of items whose first element sits at position `start`.
///
/// Item `i` of the run belongs to position `start + i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Run<T> {
    start: u64,
    items: Vec<T>,
}

impl<T> Run<T> {
    /// Create a run starting at `start`.
    pub fn new(start: u64, items: Vec<T>) -> Self {
        Self { start, items }
    }

    /// Position of the first item.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// One past the position of the last item.
    pub fn end(&self) -> u64 {
        self.start + self.items.len() as u64
    }

    /// Number of items in the run.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the run carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in position order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the run and return its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Consume the run and return `(start, items)`.
    pub fn into_parts(self) -> (u64, Vec<T>) {
        (self.start, self.items)
    }

    /// Iterate items paired with their positions.
    pub fn positions(&self) -> impl Iterator<Item = (u64, &T)> + '_ {
        (self.start..).zip(self.items.iter())
    }
}

impl<T> IntoIterator for Run<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Run<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
