//! Revocable event subscriptions.
//!
//! The viewport glue registers one revoker per DOM listener. Draining the
//! registry removes every listener; dropping it does the same.

#[derive(Default)]
pub struct Subscriptions {
    revokers: Vec<Box<dyn FnOnce()>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, revoke: impl FnOnce() + 'static) {
        self.revokers.push(Box::new(revoke));
    }

    pub fn len(&self) -> usize {
        self.revokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revokers.is_empty()
    }

    /// Revoke everything registered so far. Returns how many were revoked;
    /// a second call revokes nothing.
    pub fn dispose(&mut self) -> usize {
        let revokers = std::mem::take(&mut self.revokers);
        let count = revokers.len();
        for revoke in revokers {
            revoke();
        }
        count
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("active", &self.revokers.len())
            .finish()
    }
}
