//! Read-only view shared by the ordered containers.

/// A finite, ordered sequence of items backed by a contiguous slice.
pub trait Collection {
    type Item;

    fn len(&self) -> usize;

    /// Items in insertion order.
    fn list(&self) -> &[Self::Item];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_not_empty(&self) -> bool {
        !Collection::is_empty(self)
    }

    /// First item in insertion order.
    fn first(&self) -> Option<&Self::Item> {
        self.list().first()
    }
}
