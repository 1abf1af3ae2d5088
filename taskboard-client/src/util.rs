use std::{collections::HashSet, hash::Hash};

pub trait Compact {
    /// Drops repeated elements, keeping the first occurrence of each.
    fn compact(self) -> Self;
}

impl<T: Eq + Hash + Clone> Compact for Vec<T> {
    fn compact(self) -> Self {
        let mut seen = HashSet::new();
        self.into_iter()
            .filter(|item| seen.insert(item.clone()))
            .collect()
    }
}
