//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for node and edge identity, and
//! the [`IdGenerator`] that produces fresh identifiers when templates and
//! imported documents are instantiated.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning
///
/// Node and edge identities are opaque strings; interning makes them `Copy`
/// and cheap to compare, which matters because every incremental render pass
/// looks visuals up by id.
///
/// # Examples
///
/// ```
/// use arguendo_core::identifier::Id;
///
/// let claim = Id::new("claim-arises");
/// let result = Id::new("result");
///
/// assert_ne!(claim, result);
/// assert!(claim == "claim-arises");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Examples
    ///
    /// ```
    /// use arguendo_core::identifier::Id;
    ///
    /// let node_id = Id::new("premise_1");
    /// let edge_id = Id::new("e42");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    /// Allows direct comparison with string references: `id == &string`
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Produces fresh, session-unique identifiers.
///
/// Template and document loading instantiate nodes with new identities so
/// that repeated loads never collide with ids already in the model. The
/// generator is a plain counter behind a prefix; determinism keeps loader
/// behavior reproducible.
///
/// # Examples
///
/// ```
/// use arguendo_core::identifier::IdGenerator;
///
/// let mut ids = IdGenerator::new("n");
/// let first = ids.next_id();
/// let second = ids.next_id();
///
/// assert_ne!(first, second);
/// assert!(first == "n1");
/// ```
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    counter: usize,
}

impl IdGenerator {
    /// Creates a generator whose ids are `{prefix}{counter}`, starting at 1.
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, counter: 0 }
    }

    /// Returns the next fresh identifier.
    pub fn next_id(&mut self) -> Id {
        self.counter += 1;
        Id::new(&format!("{}{}", self.prefix, self.counter))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("premise");
        let id2 = Id::new("premise");
        let id3 = Id::new("conclusion");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "premise");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "test_string".into();
        let id2 = Id::new("test_string");

        assert_eq!(id1, id2);
        assert_eq!(id1, "test_string");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_generator_produces_distinct_ids() {
        let mut ids = IdGenerator::new("gen_test_");
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(a, "gen_test_1");
        assert_eq!(c, "gen_test_3");
    }

    #[test]
    fn test_generator_default_prefix() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_id(), "n1");
    }
}
