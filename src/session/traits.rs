//! Capability-Traits der Session-Schicht
//!
//! Raum, lokaler Teilnehmer und Connector werden als Traits modelliert,
//! damit die Alert- und Geräte-Logik gegen Fakes testbar bleibt und kein
//! konkretes SDK in den Kern einsickert.

use super::events::{ConnectionState, ParticipantEvent, ParticipantInfo, RoomEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error("failed to connect to room: {0}")]
    ConnectFailed(String),

    #[error("not connected to a room")]
    NotConnected,
}

// ============================================================================
// HANDLER REGISTRATION
// ============================================================================

/// Schlüssel einer Handler-Registrierung
///
/// Wird beim Registrieren vergeben und beim Abmelden wieder vorgelegt;
/// die Event Bridge führt darüber ihre explizite Registrierungsliste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Handler für Raum-Events
pub type RoomEventHandler = Arc<dyn Fn(&RoomEvent) + Send + Sync>;

/// Handler für Events des lokalen Teilnehmers
pub type ParticipantEventHandler = Arc<dyn Fn(&ParticipantEvent) + Send + Sync>;

// ============================================================================
// DEVICE KIND
// ============================================================================

/// Geräteklasse für `switch_active_device`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaDeviceKind {
    AudioInput,
    AudioOutput,
}

impl MediaDeviceKind {
    /// Bezeichner, wie ihn das SDK erwartet
    pub fn as_str(self) -> &'static str {
        match self {
            MediaDeviceKind::AudioInput => "audioinput",
            MediaDeviceKind::AudioOutput => "audiooutput",
        }
    }
}

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// Handle auf den aktiven Raum
///
/// Event-Quelle (Verbindungs-, Teilnehmer- und Geräte-Events) und Ziel
/// der Steuer-Operationen (Mute, Gerätewechsel, Trennen).
pub trait RoomSession: Send + Sync {
    /// Registriert einen Event-Handler und gibt dessen Schlüssel zurück
    fn on_event(&self, handler: RoomEventHandler) -> HandlerId;

    /// Meldet einen zuvor registrierten Handler ab (idempotent)
    fn off_event(&self, id: HandlerId);

    /// Schaltet das lokale Mikrofon ein oder aus
    fn set_microphone_enabled(&self, enabled: bool);

    /// Wechselt das aktive Gerät der angegebenen Klasse
    fn switch_active_device(&self, kind: MediaDeviceKind, device_id: &str);

    /// Trennt die Verbindung zum Raum
    fn disconnect(&self);

    /// Aktueller Verbindungszustand
    fn connection_state(&self) -> ConnectionState;

    /// Momentaufnahme der entfernten Teilnehmer
    fn remote_participants(&self) -> Vec<ParticipantInfo>;
}

/// Handle auf den lokalen Teilnehmer
pub trait LocalParticipant: Send + Sync {
    /// Registriert einen Event-Handler und gibt dessen Schlüssel zurück
    fn on_event(&self, handler: ParticipantEventHandler) -> HandlerId;

    /// Meldet einen zuvor registrierten Handler ab (idempotent)
    fn off_event(&self, id: HandlerId);

    /// Ist das lokale Mikrofon derzeit stummgeschaltet?
    fn is_microphone_muted(&self) -> bool;

    /// Momentaufnahme des lokalen Teilnehmers
    fn info(&self) -> ParticipantInfo;
}

// ============================================================================
// CONNECTOR
// ============================================================================

/// Audio-Optionen für den Beitritt
#[derive(Debug, Clone, Default)]
pub struct AudioOptions {
    /// Mikrofon beim Beitritt aktivieren?
    pub enabled: bool,
    /// Gewünschtes Eingabegerät (SDK-Default, wenn leer)
    pub device_id: Option<String>,
}

/// Ergebnis eines erfolgreichen Beitritts
#[derive(Clone)]
pub struct ConnectedRoom {
    pub room: Arc<dyn RoomSession>,
    pub local_participant: Arc<dyn LocalParticipant>,
}

/// Naht zum echten SDK: baut die Verbindung zum Raum auf
#[async_trait]
pub trait RtcConnector: Send + Sync {
    async fn connect(
        &self,
        server_url: &str,
        token: &str,
        audio: AudioOptions,
    ) -> Result<ConnectedRoom, SessionError>;
}
