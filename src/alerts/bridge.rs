//! Alert Bridge
//!
//! Übersetzt Session- und Teilnehmer-Events in genau eine Store-Mutation
//! pro Event. Registriert beim Anhängen je einen Handler pro Event-Quelle
//! und führt darüber eine explizite Registrierungsliste, damit beim
//! Abhängen jeder Handler genau einmal abgemeldet wird.

use super::store::{AlertStore, NewAlert};
use crate::host::HostContainer;
use crate::session::{
    HandlerId, LocalParticipant, ParticipantEvent, ParticipantEventHandler, RoomEvent,
    RoomEventHandler, RoomSession, TrackSource,
};
use std::sync::Arc;
use std::time::Duration;

/// Gerätefehler bleiben länger sichtbar als gewöhnliche Alerts
const DEVICE_ERROR_TTL: Duration = Duration::from_millis(6000);

// ============================================================================
// REGISTRATION LIST
// ============================================================================

enum Registration {
    Room(HandlerId),
    Participant(HandlerId),
}

// ============================================================================
// ALERT BRIDGE
// ============================================================================

/// Verbindet Session-Events mit dem Alert Store für die Dauer eines Mounts
pub struct AlertBridge {
    room: Option<Arc<dyn RoomSession>>,
    local: Option<Arc<dyn LocalParticipant>>,
    registrations: Vec<Registration>,
}

impl AlertBridge {
    /// Hängt die Bridge an Raum und lokalen Teilnehmer
    ///
    /// Fehlt eines der Handles, wird nichts registriert ("noch nicht
    /// bereit", kein Fehler) und `detach` ist ein No-op.
    pub fn attach(
        room: Option<Arc<dyn RoomSession>>,
        local: Option<Arc<dyn LocalParticipant>>,
        store: Arc<AlertStore>,
        host: Arc<dyn HostContainer>,
    ) -> Self {
        let (Some(room), Some(local)) = (room, local) else {
            tracing::debug!("alert bridge: session handles not ready, nothing to attach");
            return Self {
                room: None,
                local: None,
                registrations: Vec::new(),
            };
        };

        let mut registrations = Vec::new();

        let store_for_room = Arc::clone(&store);
        let room_for_handler = Arc::clone(&room);
        let host_for_handler = Arc::clone(&host);
        let room_handler: RoomEventHandler = Arc::new(move |event| {
            handle_room_event(event, &store_for_room, &room_for_handler, &host_for_handler);
        });
        registrations.push(Registration::Room(room.on_event(room_handler)));

        let store_for_local = Arc::clone(&store);
        let local_handler: ParticipantEventHandler = Arc::new(move |event| {
            handle_participant_event(event, &store_for_local);
        });
        registrations.push(Registration::Participant(local.on_event(local_handler)));

        tracing::debug!("alert bridge attached");

        Self {
            room: Some(room),
            local: Some(local),
            registrations,
        }
    }

    /// Meldet jeden registrierten Handler genau einmal ab
    ///
    /// Bereits laufende Auto-Ablauf-Timer werden nicht abgebrochen; sie
    /// laufen ins Leere, wenn ihr Alert schon entfernt wurde.
    pub fn detach(&mut self) {
        for registration in self.registrations.drain(..) {
            match registration {
                Registration::Room(id) => {
                    if let Some(room) = &self.room {
                        room.off_event(id);
                    }
                }
                Registration::Participant(id) => {
                    if let Some(local) = &self.local {
                        local.off_event(id);
                    }
                }
            }
        }
    }
}

impl Drop for AlertBridge {
    fn drop(&mut self) {
        self.detach();
    }
}

// ============================================================================
// EVENT MAPPING
// ============================================================================

fn handle_room_event(
    event: &RoomEvent,
    store: &Arc<AlertStore>,
    room: &Arc<dyn RoomSession>,
    host: &Arc<dyn HostContainer>,
) {
    match event {
        RoomEvent::Disconnected { reason } => {
            let fatal = reason.map(|r| r.is_fatal()).unwrap_or(false);

            if fatal {
                tracing::warn!(?reason, "fatal disconnect, call has ended");
                let room = Arc::clone(room);
                let host = Arc::clone(host);
                store.push(
                    NewAlert::error("Room closed. The call has ended.").with_action(
                        "Exit",
                        move || {
                            room.disconnect();
                            host.close();
                        },
                    ),
                );
            } else {
                let reason_text = reason
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "unknown reason".to_string());
                store.push(NewAlert::warning(format!("Disconnected: {reason_text}")));
            }
        }

        RoomEvent::Reconnecting => {
            store.push(NewAlert::warning("Reconnecting…"));
        }

        RoomEvent::Reconnected => {
            store.push(NewAlert::info("Reconnected"));
        }

        RoomEvent::ParticipantConnected(participant) => {
            store.push(NewAlert::info(format!(
                "{} joined",
                participant.display_name()
            )));
        }

        RoomEvent::ParticipantDisconnected(participant) => {
            store.push(NewAlert::warning(format!(
                "{} left",
                participant.display_name()
            )));
        }

        RoomEvent::MediaDevicesChanged => {
            store.push(NewAlert::info("Audio devices changed"));
        }

        RoomEvent::MediaDevicesError { detail } => {
            store.push_with_ttl(
                NewAlert::error(format!("Media device error: {detail}")),
                DEVICE_ERROR_TTL,
            );
        }
    }
}

fn handle_participant_event(event: &ParticipantEvent, store: &Arc<AlertStore>) {
    match event {
        ParticipantEvent::TrackMuted {
            source: TrackSource::Microphone,
        } => {
            store.push(NewAlert::warning("Microphone muted"));
        }

        // Nur das Mikrofon interessiert; Unmute erzeugt keinen Alert
        ParticipantEvent::TrackMuted { .. } | ParticipantEvent::TrackUnmuted { .. } => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================
