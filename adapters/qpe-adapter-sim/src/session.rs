//! Per-call simulation sessions.
//!
//! Every `run` opens its own [`SimSession`] holding the random source used
//! for sampling. The session is released when it goes out of scope, so a
//! run that fails halfway still gives its slot back.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// A simulation session scoped to one `run` call.
pub(crate) struct SimSession {
    id: usize,
    rng: StdRng,
    active: Arc<AtomicUsize>,
}

impl SimSession {
    /// Open a session, registering it in the shared `active` counter.
    ///
    /// A fixed `seed` makes sampling reproducible; without one the session
    /// draws from OS entropy.
    pub(crate) fn open(active: &Arc<AtomicUsize>, seed: Option<u64>) -> Self {
        let id = active.fetch_add(1, Ordering::SeqCst) + 1;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(session = id, seeded = seed.is_some(), "simulation session opened");
        Self {
            id,
            rng,
            active: Arc::clone(active),
        }
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Drop for SimSession {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        debug!(session = self.id, "simulation session released");
    }
}
