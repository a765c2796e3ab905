//! Call Module - Orchestrierung des Anruf-Lebenszyklus
//!
//! Führt die übrigen Schichten zusammen: Host-Signale beim Start,
//! Join-Parameter vom Backend, Verbindungsaufbau über den Connector,
//! Alert Bridge während des Anrufs und Aufräumen beim Verlassen.

mod app;
mod ui_state;

pub use app::{CallApp, CallAppError, CallPhase, PreJoinChoice};
pub use ui_state::{participant_tile_state, status_text, ParticipantTileState, SPEAKING_LEVEL};
