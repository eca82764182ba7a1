use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Token identifying one started request; later requests get larger tokens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Load,
    Save,
    SaveAsNew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub generation: RequestGeneration,
    pub kind: RequestKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// The settled request was the one reported as pending; the marker is cleared.
    Current,
    /// A newer request replaced it; the pending marker is left alone.
    Superseded,
}

/// Tracks which request, if any, is reported as in flight.
///
/// Starting a request always replaces the reported one. Nothing is cancelled:
/// a replaced request still runs to completion, it just settles as
/// [`Settlement::Superseded`].
#[derive(Debug, Clone, Default)]
pub struct RequestCoordinator {
    last_generation: u64,
    pending: Option<PendingRequest>,
}

impl RequestCoordinator {
    pub fn start(&mut self, kind: RequestKind) -> RequestGeneration {
        self.last_generation += 1;
        let generation = RequestGeneration(self.last_generation);
        if let Some(previous) = self.pending {
            debug!(
                previous = previous.generation.raw(),
                next = generation.raw(),
                "pending request replaced"
            );
        }
        self.pending = Some(PendingRequest { generation, kind });
        generation
    }

    pub fn settle(&mut self, generation: RequestGeneration) -> Settlement {
        if self.is_current(generation) {
            trace!(generation = generation.raw(), "request settled");
            self.pending = None;
            Settlement::Current
        } else {
            debug!(generation = generation.raw(), "superseded request settled");
            Settlement::Superseded
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn is_current(&self, generation: RequestGeneration) -> bool {
        self.pending
            .is_some_and(|pending| pending.generation == generation)
    }
}
