use heapless::Deque;

use crate::config::DISCOVERY_QUEUE_SIZE;
use crate::registry::EntityHandle;

/// A pending announcement and how many sends of it have failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryRequest {
    pub entity: EntityHandle,
    pub attempts: u8,
}

impl DiscoveryRequest {
    pub fn new(entity: EntityHandle) -> Self {
        Self {
            entity,
            attempts: 0,
        }
    }
}

/// Bounded FIFO of discovery requests; a push into a full queue is dropped.
#[derive(Debug, Default)]
pub struct DiscoveryQueue {
    requests: Deque<DiscoveryRequest, DISCOVERY_QUEUE_SIZE>,
}

impl DiscoveryQueue {
    pub fn new() -> Self {
        Self {
            requests: Deque::new(),
        }
    }

    /// Queues a fresh request; returns `false` when the queue is full
    pub fn push(&mut self, entity: EntityHandle) -> bool {
        self.requeue(DiscoveryRequest::new(entity))
    }

    /// Queues a request keeping its attempt counter
    pub fn requeue(&mut self, request: DiscoveryRequest) -> bool {
        self.requests.push_back(request).is_ok()
    }

    pub fn pop(&mut self) -> Option<DiscoveryRequest> {
        self.requests.pop_front()
    }

    pub fn reset(&mut self) {
        self.requests.clear();
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.requests.is_full()
    }
}
