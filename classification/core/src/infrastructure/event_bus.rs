// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Event Bus Implementation - Pub/Sub for Classification Events
//
// In-memory event streaming using tokio broadcast channels. Events are lost
// on restart; subscribers that fall behind lose the oldest events.

use crate::domain::content::NodeRef;
use crate::domain::events::ClassificationEvent;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<ClassificationEvent>>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Create event bus with default capacity (1000)
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    pub fn publish(&self, event: ClassificationEvent) {
        debug!("Publishing event: {:?}", event);

        let receiver_count = self.sender.send(event).unwrap_or(0);
        if receiver_count == 0 {
            debug!("No subscribers listening to event");
        }
    }

    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Subscribe to events about a single node
    pub fn subscribe_node(&self, node_ref: NodeRef) -> NodeEventReceiver {
        NodeEventReceiver {
            receiver: self.sender.subscribe(),
            node_ref,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

fn map_recv_error(e: broadcast::error::RecvError) -> EventBusError {
    match e {
        broadcast::error::RecvError::Closed => EventBusError::Closed,
        broadcast::error::RecvError::Lagged(n) => {
            warn!("Event receiver lagged by {} events", n);
            EventBusError::Lagged(n)
        }
    }
}

pub struct EventReceiver {
    receiver: broadcast::Receiver<ClassificationEvent>,
}

impl EventReceiver {
    /// Receive the next event (waits until one is available)
    pub async fn recv(&mut self) -> Result<ClassificationEvent, EventBusError> {
        self.receiver.recv().await.map_err(map_recv_error)
    }

    /// Try to receive an event without waiting
    pub fn try_recv(&mut self) -> Result<ClassificationEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Receiver filtered to one node
pub struct NodeEventReceiver {
    receiver: broadcast::Receiver<ClassificationEvent>,
    node_ref: NodeRef,
}

impl NodeEventReceiver {
    pub async fn recv(&mut self) -> Result<ClassificationEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(map_recv_error)?;
            if event.node_ref() == Some(&self.node_ref) {
                return Ok(event);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}
