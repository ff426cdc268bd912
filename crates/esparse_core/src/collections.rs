//! Hash collections used for scope and module bookkeeping.
//!
//! Parser tables never face untrusted-key DoS concerns, so everything is
//! keyed with FxHash. Ordered variants keep insertion order where the IR
//! must reflect source order (class elements, module requests).

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Insertion-ordered map keyed with FxHash.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set keyed with FxHash.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_map_replaces_in_place() {
        let mut map: FxIndexMap<&str, u32> = FxIndexMap::default();
        map.insert("c", 3);
        map.insert("a", 1);
        map.insert("c", 30);

        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![("c", 30), ("a", 1)]);
    }

    #[test]
    fn test_index_set_dedups_preserving_order() {
        let mut set: FxIndexSet<&str> = FxIndexSet::default();
        assert!(set.insert("m"));
        assert!(set.insert("n"));
        assert!(!set.insert("m"));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["m", "n"]);
    }
}
