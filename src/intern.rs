//! Interned node names.
//!
//! Markup trees repeat a small vocabulary of element names many times over.
//! Every [`Name`] shares its text with all equal live names through a
//! process-wide interner, so cloning a name or a node handle never copies
//! string data. The interner does not keep names alive on its own.

use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock, Weak};

/// An interned node name
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        intern_name(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        intern_name(&s)
    }
}

impl From<&String> for Name {
    fn from(s: &String) -> Self {
        intern_name(s)
    }
}

/// Smallest table size at which dead entries are swept
const MIN_PRUNE_AT: usize = 64;

/// Name table holding weak references, so a name is released once no node
/// uses it. Dead entries are swept whenever the table doubles.
pub struct NameInterner {
    names: RwLock<NameTable>,
}

struct NameTable {
    entries: HashMap<Box<str>, Weak<str>>,
    prune_at: usize,
}

impl NameTable {
    fn lookup(&self, s: &str) -> Option<Name> {
        self.entries.get(s).and_then(Weak::upgrade).map(Name)
    }

    fn insert(&mut self, s: &str) -> Name {
        if self.entries.len() >= self.prune_at {
            self.entries.retain(|_, name| name.strong_count() > 0);
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_AT);
        }

        let interned: Arc<str> = Arc::from(s);
        self.entries.insert(Box::from(s), Arc::downgrade(&interned));
        Name(interned)
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl NameInterner {
    pub fn new() -> Self {
        Self {
            names: RwLock::new(NameTable {
                entries: HashMap::new(),
                prune_at: MIN_PRUNE_AT,
            }),
        }
    }

    pub fn intern(&self, s: &str) -> Name {
        if let Some(name) = self.names.read().lookup(s) {
            return name;
        }

        let mut write_guard = self.names.write();
        if let Some(name) = write_guard.lookup(s) {
            return name;
        }
        write_guard.insert(s)
    }

    /// Number of names still in use
    pub fn len(&self) -> usize {
        self.names
            .read()
            .entries
            .values()
            .filter(|name| name.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn global() -> &'static NameInterner {
    static INTERNER: OnceLock<NameInterner> = OnceLock::new();
    INTERNER.get_or_init(NameInterner::new)
}

/// Intern `s` in the process-wide interner
pub fn intern_name(s: &str) -> Name {
    global().intern(s)
}
