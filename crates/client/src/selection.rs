//! Products chosen for submission during order review.

use order_desk_core::ProductId;

/// An insertion-ordered set of product ids picked from the cart.
///
/// A selection lives only for one review. [`CartStore::proceed`] hands out a
/// fresh one; submission clears it on success.
///
/// [`CartStore::proceed`]: crate::cart::CartStore::proceed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ProductId>,
}

impl Selection {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add `id`. Returns `false` if it was already selected.
    pub fn select(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns `false` if it was not selected.
    pub fn deselect(&mut self, id: ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| *selected != id);
        self.ids.len() != before
    }

    /// Flip `id` in or out, like ticking a checkbox. Returns the new state.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<ProductId> for Selection {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.select(id);
        }
        selection
    }
}

impl Extend<ProductId> for Selection {
    fn extend<I: IntoIterator<Item = ProductId>>(&mut self, iter: I) {
        for id in iter {
            self.select(id);
        }
    }
}
