//! State core for a competitions screen.
//!
//! A [`CompetitionStore`] holds the full list of competitions, the list the
//! user has joined, and a short-lived notification flag raised on each
//! successful join. Presentation code reads snapshots or subscribes to
//! changes and calls [`CompetitionStore::join`]; nothing else mutates state.

pub use config::{
    StoreConfig, DEFAULT_EVENT_CAPACITY, DEFAULT_NOTIFICATION_DELAY, MAX_EVENT_CAPACITY,
    NOTIFICATION_MESSAGE,
};
pub use error::{Result, StoreError};
pub use model::*;
pub use store::{CompetitionStore, CompetitionStoreBuilder};

pub mod config;
pub mod error;
pub mod scheduler;
pub mod seed;

mod model;
mod store;
