//! API Module - Join-Parameter vom Backend
//!
//! Ein einzelner REST-Aufruf holt Server-URL und Zugangs-Token, bevor
//! der Raum betreten wird. Der Client steckt hinter dem `JoinApi`-Trait,
//! damit die Orchestrierung gegen Fakes testbar bleibt.

mod client;
mod messages;

use async_trait::async_trait;

pub use client::{ApiClient, ApiError};
pub use messages::JoinRoomParams;

/// Naht zum Backend: liefert die Beitritts-Parameter
#[async_trait]
pub trait JoinApi: Send + Sync {
    async fn join_params(&self, init_data: &str) -> Result<JoinRoomParams, ApiError>;
}
