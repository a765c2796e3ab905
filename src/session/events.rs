//! Event-Typen der Session-Schicht
//!
//! Diese Enums spiegeln die Event-Oberfläche des externen RTC-SDKs
//! wider, soweit der Client sie konsumiert. Alles Weitere (Tracks,
//! Statistiken, Datenkanäle) bleibt bewusst außen vor.

use std::fmt;

// ============================================================================
// DISCONNECT REASON
// ============================================================================

/// Grund für das Ende einer Session, wie vom SDK gemeldet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Kein oder unbekannter Grund
    Unknown,
    /// Der Client hat selbst getrennt
    ClientInitiated,
    /// Ein zweiter Login mit derselben Identität hat die Session verdrängt
    DuplicateIdentity,
    /// Server wird heruntergefahren
    ServerShutdown,
    /// Teilnehmer wurde aus dem Raum entfernt
    ParticipantRemoved,
    /// Raum wurde gelöscht
    RoomDeleted,
    /// Client- und Server-Zustand passen nicht mehr zusammen
    StateMismatch,
    /// Beitritt ist fehlgeschlagen
    JoinFailure,
    /// Signaling-Verbindung wurde geschlossen
    SignalClose,
}

impl DisconnectReason {
    /// Fatal = eine Wiederverbindung ist nicht zu erwarten
    /// (Server-Shutdown, Raum gelöscht, Entfernung, Zustands-Mismatch).
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            DisconnectReason::ServerShutdown
                | DisconnectReason::RoomDeleted
                | DisconnectReason::ParticipantRemoved
                | DisconnectReason::StateMismatch
        )
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DisconnectReason::Unknown => "unknown reason",
            DisconnectReason::ClientInitiated => "client initiated",
            DisconnectReason::DuplicateIdentity => "duplicate identity",
            DisconnectReason::ServerShutdown => "server shutdown",
            DisconnectReason::ParticipantRemoved => "participant removed",
            DisconnectReason::RoomDeleted => "room deleted",
            DisconnectReason::StateMismatch => "state mismatch",
            DisconnectReason::JoinFailure => "join failure",
            DisconnectReason::SignalClose => "signal connection closed",
        };
        f.write_str(text)
    }
}

// ============================================================================
// PARTICIPANTS
// ============================================================================

/// Momentaufnahme eines Teilnehmers für Events und Render-Schicht
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantInfo {
    /// Eindeutige Identität innerhalb des Raums
    pub identity: String,
    /// Anzeigename (optional, fällt auf die Identität zurück)
    pub name: Option<String>,
    /// Ist dies der lokale Teilnehmer?
    pub is_local: bool,
    /// Ist das Mikrofon dieses Teilnehmers stummgeschaltet?
    pub is_muted: bool,
    /// Aktueller Audio-Pegel (0.0 .. 1.0)
    pub audio_level: f32,
}

impl ParticipantInfo {
    /// Anzeigename mit Fallback auf die Identität
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.identity,
        }
    }
}

/// Quelle eines Medien-Tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSource {
    Microphone,
    Camera,
    ScreenShare,
    Unknown,
}

// ============================================================================
// EVENTS
// ============================================================================

/// Events, die der Raum liefert
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// Session wurde beendet
    Disconnected { reason: Option<DisconnectReason> },

    /// Wiederverbindungsversuch läuft
    Reconnecting,

    /// Wiederverbindung erfolgreich
    Reconnected,

    /// Teilnehmer ist beigetreten
    ParticipantConnected(ParticipantInfo),

    /// Teilnehmer hat den Raum verlassen
    ParticipantDisconnected(ParticipantInfo),

    /// Die Menge der Audio-Geräte hat sich geändert
    MediaDevicesChanged,

    /// Fehler eines Medien-Geräts
    MediaDevicesError { detail: String },
}

/// Events des lokalen Teilnehmers
#[derive(Debug, Clone)]
pub enum ParticipantEvent {
    /// Ein lokaler Track wurde stummgeschaltet
    TrackMuted { source: TrackSource },

    /// Ein lokaler Track wurde wieder aktiviert
    TrackUnmuted { source: TrackSource },
}

// ============================================================================
// CONNECTION STATE
// ============================================================================

/// Verbindungszustand des Raums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Reconnecting,
    Disconnected,
}

// ============================================================================
// TESTS
// ============================================================================
