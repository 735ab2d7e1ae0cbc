//! Debug-only single-actor check.
//!
//! The table calls into user `Hash`/`Eq` implementations while probing a
//! chain. If that user code reaches back into the same table, it observes a
//! lookup in progress. `ActorCheck` catches that in debug builds and
//! compiles to nothing in release builds.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table tracker. Sections that run user code are wrapped in
/// `let _s = self.actor.enter();`.
///
/// The type is `Send` but not `Sync` in every build profile: one actor at a
/// time, and sharing across threads needs an external lock.
#[derive(Debug)]
pub(crate) struct ActorCheck {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    _not_sync: PhantomData<Cell<()>>,
}

impl ActorCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _not_sync: PhantomData,
        }
    }

    /// Start a section that may call user code. Panics in debug builds if a
    /// section is already open on this table.
    #[inline]
    pub(crate) fn enter(&self) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "hash table re-entered from a key's Hash or Eq implementation"
            );
            Section { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Section { _z: PhantomData }
        }
    }
}

impl Default for ActorCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Open section; closes on drop.
pub(crate) struct Section<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ActorCheck,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
