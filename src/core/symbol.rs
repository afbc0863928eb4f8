//! Symbol interning.
//!
//! Variables are interned in a global registry so that equality is an O(1)
//! key comparison rather than a string comparison, and so that "dummy"
//! symbols (the fresh `w` the rewriter introduces on every call, and the
//! fresh `x'` the limit driver introduces to normalise towards infinity)
//! can never collide with a user-visible name or with each other, matching
//! §3's `Symbol(name, dummy?)` data model.
//!
//! This mirrors the teacher's `core/symbol/{interned,registry}.rs`, simplified
//! to a single non-sharded registry — this crate never sees the symbol-table
//! contention a full CAS's parser does, so the teacher's 16-way sharded
//! `RwLock` would be pure overhead here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, RwLock};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::core::expr::Expr;

new_key_type! {
    struct SymbolKey;
}

/// A unique, interned symbol.
///
/// Clone-cheap: it is just a registry key plus an optional `Arc<str>` name.
/// Two symbols are equal iff they share the same key — never by name, so a
/// freshly minted dummy symbol is guaranteed distinct from every other
/// symbol in the process, including one constructed from the same base
/// name hint.
#[derive(Debug, Clone)]
pub struct Symbol {
    key: SymbolKey,
    name: Option<Arc<str>>,
}

impl Symbol {
    /// The symbol's globally unique id (stable for the process lifetime).
    #[must_use]
    pub fn id(&self) -> u64 {
        use slotmap::Key;
        self.key.data().as_ffi()
    }

    /// The symbol's name, or `None` if it is an anonymous dummy.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this is an anonymous dummy symbol (never collides with any
    /// named symbol, per §3's `dummy?` flag).
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.name.is_none()
    }

    /// Wrap this symbol as a leaf expression.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        Expr::from_symbol(self.clone())
    }

    /// `exp(self)`, as a convenience over `self.to_expr().exp()`-style chains.
    #[must_use]
    pub fn exp(&self) -> Expr {
        Expr::exp(self.to_expr())
    }

    /// `ln(self)`.
    #[must_use]
    pub fn ln(&self) -> Expr {
        Expr::ln(self.to_expr())
    }

    /// `self ^ exp` for a rational constant exponent.
    #[must_use]
    pub fn pow(&self, exp: crate::core::rational::Rational) -> Expr {
        Expr::pow(self.to_expr(), exp)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => self.id().cmp(&other.id()),
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "_w{}", self.id()),
        }
    }
}

struct Registry {
    slots: SlotMap<SymbolKey, Option<Arc<str>>>,
    by_name: FxHashMap<String, SymbolKey>,
}

impl Registry {
    fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            by_name: FxHashMap::default(),
        }
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));
static DUMMY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Intern (or look up) a named symbol.
///
/// Calling this twice with the same name returns symbols that compare equal
/// — this is how the same `x` typed in two places ends up being the same
/// variable for the purposes of `depends_on`/`substitute`.
#[must_use]
pub fn symb(name: &str) -> Symbol {
    if let Some(key) = REGISTRY.read().expect("symbol registry poisoned").by_name.get(name) {
        return Symbol {
            key: *key,
            name: Some(Arc::from(name)),
        };
    }
    let mut registry = REGISTRY.write().expect("symbol registry poisoned");
    // Re-check: another thread may have interned it between the read and write locks.
    if let Some(key) = registry.by_name.get(name) {
        return Symbol {
            key: *key,
            name: Some(Arc::from(name)),
        };
    }
    let name_arc: Arc<str> = Arc::from(name);
    let key = registry.slots.insert(Some(name_arc.clone()));
    registry.by_name.insert(name.to_owned(), key);
    Symbol {
        key,
        name: Some(name_arc),
    }
}

/// Mint a fresh anonymous dummy symbol, guaranteed never to collide with any
/// named symbol or any other dummy.
///
/// Every call to the rewriter (§4.4) and to the limit driver's `x'`
/// normalisation (§4.7) goes through here, keeping the "fresh-symbol
/// hygiene" discipline from §9: reusing names across calls would allow
/// accidental capture and silent wrong answers.
#[must_use]
pub fn fresh_dummy() -> Symbol {
    DUMMY_COUNTER.fetch_add(1, Ordering::Relaxed);
    let key = REGISTRY
        .write()
        .expect("symbol registry poisoned")
        .slots
        .insert(None);
    Symbol { key, name: None }
}
