use crate::{InfectionError, Result, UserId};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Set of every uid handed out so far.
///
/// A graph owns one by default. Several graphs can share one through an `Arc` so that an
/// identifier is never issued twice among them, even when users are created from several threads.
#[derive(Debug, Default)]
pub struct UidRegistry {
    uids: Mutex<HashSet<UserId>>,
}

impl UidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `uid`, failing if it was claimed before and not released by [`UidRegistry::reset`].
    pub fn register(&self, uid: UserId) -> Result<()> {
        if self.uids.lock().insert(uid) {
            Ok(())
        } else {
            Err(InfectionError::DuplicateIdentifier(uid))
        }
    }

    pub fn contains(&self, uid: UserId) -> bool {
        self.uids.lock().contains(&uid)
    }

    pub fn len(&self) -> usize {
        self.uids.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.lock().is_empty()
    }

    /// Returns `uids` to the registry so they can be issued again.
    pub fn release<I>(&self, uids: I)
    where
        I: IntoIterator<Item = UserId>,
    {
        let mut issued = self.uids.lock();
        for uid in uids {
            issued.remove(&uid);
        }
    }

    /// Forgets all uids so a new group of users can be created.
    pub fn reset(&self) {
        self.uids.lock().clear();
    }
}
