use dashmap::DashMap;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::models::booking::Booking;
use crate::models::walk::Walk;
use crate::models::walker::Walker;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub walkers: DashMap<Uuid, Walker>,
    pub walks: DashMap<Uuid, Walk>,
    pub bookings: DashMap<Uuid, Booking>,
    pub walk_tx: mpsc::Sender<Walk>,
    pub booking_events_tx: broadcast::Sender<Booking>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(walk_queue_size: usize, event_buffer_size: usize) -> (Self, mpsc::Receiver<Walk>) {
        let (walk_tx, walk_rx) = mpsc::channel(walk_queue_size);
        let (booking_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        (
            Self {
                walkers: DashMap::new(),
                walks: DashMap::new(),
                bookings: DashMap::new(),
                walk_tx,
                booking_events_tx,
                metrics: Metrics::new(),
            },
            walk_rx,
        )
    }
}
