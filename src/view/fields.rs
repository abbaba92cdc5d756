// src/view/fields.rs
use std::borrow::Cow;

use crate::rank::Ranked;
use crate::table::Record;

/// Synthetic key exposing a ranked row's 1-based position.
pub const POSITION_KEY: &str = "__pos";

/// Uniform field lookup for anything the view layer projects.
pub trait Fields {
    fn field(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Field value, `""` when absent.
    fn text(&self, key: &str) -> Cow<'_, str> {
        self.field(key).unwrap_or(Cow::Borrowed(""))
    }
}

impl Fields for Record {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl<T: Fields> Fields for Ranked<T> {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        if key == POSITION_KEY {
            return Some(Cow::Owned(self.position.to_string()));
        }
        self.item.field(key)
    }
}

impl<T: Fields + ?Sized> Fields for &T {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).field(key)
    }
}
