//! Abgeleiteter Anzeige-Zustand
//!
//! Reine Funktionen von Session-Momentaufnahmen auf Anzeige-Werte;
//! die Render-Schicht selbst liegt außerhalb dieses Kerns.

use crate::session::{ConnectionState, ParticipantInfo};

/// Pegel, ab dem ein Teilnehmer als sprechend gilt
pub const SPEAKING_LEVEL: f32 = 0.02;

/// Statuszeile für den Verbindungszustand
pub fn status_text(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Connecting => "Connecting…",
        ConnectionState::Reconnecting => "Reconnecting…",
        ConnectionState::Disconnected => "Disconnected",
        ConnectionState::Connected => "Connected",
    }
}

// ============================================================================
// PARTICIPANT TILES
// ============================================================================

/// Anzeige-Zustand einer Teilnehmer-Kachel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantTileState {
    /// Mikrofon stummgeschaltet
    Muted,
    /// Spricht gerade (Pegel über der Schwelle)
    Speaking,
    /// Hört zu
    Listening,
}

impl ParticipantTileState {
    pub fn label(self) -> &'static str {
        match self {
            ParticipantTileState::Muted => "muted",
            ParticipantTileState::Speaking => "speaking",
            ParticipantTileState::Listening => "listening",
        }
    }
}

/// Leitet den Kachel-Zustand aus der Teilnehmer-Momentaufnahme ab
///
/// Stummschaltung gewinnt gegen den Audio-Pegel.
pub fn participant_tile_state(participant: &ParticipantInfo) -> ParticipantTileState {
    if participant.is_muted {
        ParticipantTileState::Muted
    } else if participant.audio_level > SPEAKING_LEVEL {
        ParticipantTileState::Speaking
    } else {
        ParticipantTileState::Listening
    }
}

// ============================================================================
// TESTS
// ============================================================================
