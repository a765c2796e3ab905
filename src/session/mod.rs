//! Session Module - Anbindung an das externe RTC-SDK
//!
//! Dieses Modul definiert:
//! - Events, die der Raum und der lokale Teilnehmer liefern
//! - Capability-Traits für Raum, lokalen Teilnehmer und Connector
//! - Fehlertypen der Session-Schicht
//!
//! Der eigentliche Medientransport lebt vollständig hinter diesen
//! Traits; der Kern rendert nur Zustand und leitet Nutzer-Intents weiter.

mod events;
mod traits;

pub use events::{
    ConnectionState, DisconnectReason, ParticipantEvent, ParticipantInfo, RoomEvent, TrackSource,
};
pub use traits::{
    AudioOptions, ConnectedRoom, HandlerId, LocalParticipant, MediaDeviceKind,
    ParticipantEventHandler, RoomEventHandler, RoomSession, RtcConnector, SessionError,
};
