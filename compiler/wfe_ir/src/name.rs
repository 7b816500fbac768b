//! Per-tree string pool.
//!
//! Variable names, property names, callees and string literal values are
//! stored once per tree and referenced by a 4-byte [`Name`]. This keeps
//! [`ExprKind`](crate::ExprKind) `Copy` and makes name equality an integer
//! compare. Names are only meaningful for the tree that produced them.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::arena::to_u32;
use crate::BuildError;

/// Handle to a string in a tree's [`NamePool`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Deduplicating string storage.
///
/// Single-producer: filled while the tree is built, read-only afterwards.
#[derive(Clone, Default)]
pub struct NamePool {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing handle if it was seen before.
    pub fn intern(&mut self, s: &str) -> Result<Name, BuildError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let name = Name(to_u32(self.strings.len(), "interned names")?);
        let owned: Box<str> = Box::from(s);
        self.strings.push(owned.clone());
        self.map.insert(owned, name);
        Ok(name)
    }

    /// Look up the string for `name`.
    ///
    /// # Panics
    /// Panics if `name` came from a different pool.
    #[inline]
    #[track_caller]
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Number of distinct strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl fmt::Debug for NamePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.strings.iter()).finish()
    }
}
