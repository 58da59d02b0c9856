use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Newtype over `Arc<str>`: clones into snapshots, timer entries and
/// render commands are a refcount bump.
macro_rules! shared_str_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq)]
        pub struct $name(Arc<str>);

        impl $name {
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl PartialEq for $name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
            }
        }

        impl PartialEq<str> for $name {
            #[inline]
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            #[inline]
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                (*self.0).hash(state);
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                $name(Arc::from(s))
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                $name(Arc::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        // Hand-rolled so serde's `rc` feature stays off.
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::from(s))
            }
        }
    };
}

shared_str_type! {
    /// Identifier of one highlight, shared between the registry record, its
    /// removal timer and every snapshot that contains it.
    HighlightId
}

shared_str_type! {
    /// Display text: highlight labels and overlay group names.
    SharedText
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_compare_equal() {
        let a = HighlightId::from("Button-1");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a, "Button-1");
    }

    #[test]
    fn empty_id_is_detected() {
        assert!(HighlightId::from("").is_empty());
        assert!(!HighlightId::from(String::from("r1")).is_empty());
    }

    #[test]
    fn hashset_lookup_by_str() {
        let mut set = std::collections::HashSet::new();
        set.insert(HighlightId::from("r1"));
        assert!(set.contains("r1"));
        assert!(!set.contains("r2"));
    }

    #[test]
    fn labels_are_separate_from_ids() {
        let label = SharedText::from("Feed");
        assert_eq!(label, "Feed");
        assert_eq!(label.to_string(), "Feed");
        assert!(SharedText::from("").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = HighlightId::from("List-42");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"List-42\"");
        let back: HighlightId =
            serde_json::from_str(&json).unwrap_or_else(|_| HighlightId::from(""));
        assert_eq!(back, id);
    }
}
