//! Mount identities that scope background requests to a view's lifetime

use std::fmt;

/// Identity of one mounted view instance.
///
/// Every request a view issues is tagged with its `MountId`. When the view is
/// unmounted the worker aborts that mount's fetches and the shell drops any
/// result still addressed to it, so late results never reach a view that no
/// longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(u64);

impl MountId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

/// Hands out fresh, never reused mount ids
#[derive(Debug, Default)]
pub struct MountCounter {
    next: u64,
}

impl MountCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MountId {
        self.next += 1;
        MountId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut counter = MountCounter::new();
        let a = counter.next_id();
        let b = counter.next_id();
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(a.to_string(), "mount#1");
    }
}
