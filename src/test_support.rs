//! Gemeinsame Fakes für die Modul-Tests
//!
//! Alle externen Mitspieler (Raum, lokaler Teilnehmer, Host-Container,
//! Connector, Backend, Geräte-Quelle) als instrumentierte Attrappen:
//! sie zeichnen Aufrufe auf und lassen Events von Hand auslösen.

use crate::api::{ApiError, JoinApi, JoinRoomParams};
use crate::devices::{AudioDeviceSource, AudioInputDevice, DeviceError};
use crate::host::{HostContainer, Viewport, ViewportHandler};
use crate::session::{
    AudioOptions, ConnectedRoom, ConnectionState, HandlerId, LocalParticipant, MediaDeviceKind,
    ParticipantEvent, ParticipantEventHandler, ParticipantInfo, RoomEvent, RoomEventHandler,
    RoomSession, RtcConnector, SessionError,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// FAKE ROOM SESSION
// ============================================================================

pub struct FakeRoomSession {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(HandlerId, RoomEventHandler)>>,
    pub disconnect_calls: AtomicUsize,
    pub mic_enabled: Mutex<Vec<bool>>,
    pub switched_devices: Mutex<Vec<(MediaDeviceKind, String)>>,
    pub state: Mutex<ConnectionState>,
    pub remotes: Mutex<Vec<ParticipantInfo>>,
}

impl FakeRoomSession {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(Vec::new()),
            disconnect_calls: AtomicUsize::new(0),
            mic_enabled: Mutex::new(Vec::new()),
            switched_devices: Mutex::new(Vec::new()),
            state: Mutex::new(ConnectionState::Connected),
            remotes: Mutex::new(Vec::new()),
        }
    }

    /// Löst ein Raum-Event bei allen registrierten Handlern aus
    pub fn emit(&self, event: RoomEvent) {
        // Kopie ziehen, damit Handler den Store ohne Deadlock anfassen können
        let handlers: Vec<RoomEventHandler> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl RoomSession for FakeRoomSession {
    fn on_event(&self, handler: RoomEventHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers.lock().push((id, handler));
        id
    }

    fn off_event(&self, id: HandlerId) {
        self.handlers.lock().retain(|(other, _)| *other != id);
    }

    fn set_microphone_enabled(&self, enabled: bool) {
        self.mic_enabled.lock().push(enabled);
    }

    fn switch_active_device(&self, kind: MediaDeviceKind, device_id: &str) {
        self.switched_devices
            .lock()
            .push((kind, device_id.to_string()));
    }

    fn disconnect(&self) {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn connection_state(&self) -> ConnectionState {
        *self.state.lock()
    }

    fn remote_participants(&self) -> Vec<ParticipantInfo> {
        self.remotes.lock().clone()
    }
}

// ============================================================================
// FAKE LOCAL PARTICIPANT
// ============================================================================

pub struct FakeLocalParticipant {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(HandlerId, ParticipantEventHandler)>>,
    muted: AtomicBool,
}

impl FakeLocalParticipant {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(Vec::new()),
            muted: AtomicBool::new(false),
        }
    }

    pub fn emit(&self, event: ParticipantEvent) {
        let handlers: Vec<ParticipantEventHandler> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }
}

impl LocalParticipant for FakeLocalParticipant {
    fn on_event(&self, handler: ParticipantEventHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers.lock().push((id, handler));
        id
    }

    fn off_event(&self, id: HandlerId) {
        self.handlers.lock().retain(|(other, _)| *other != id);
    }

    fn is_microphone_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn info(&self) -> ParticipantInfo {
        ParticipantInfo {
            identity: "local".to_string(),
            name: None,
            is_local: true,
            is_muted: self.is_microphone_muted(),
            audio_level: 0.0,
        }
    }
}

// ============================================================================
// FAKE HOST CONTAINER
// ============================================================================

pub struct FakeHost {
    init_data: String,
    pub ready_calls: AtomicUsize,
    pub expand_calls: AtomicUsize,
    pub close_calls: AtomicUsize,
    next_id: AtomicU64,
    viewport_handlers: Mutex<Vec<(HandlerId, ViewportHandler)>>,
}

impl FakeHost {
    pub fn new(init_data: &str) -> Self {
        Self {
            init_data: init_data.to_string(),
            ready_calls: AtomicUsize::new(0),
            expand_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            viewport_handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn emit_viewport(&self, viewport: Viewport) {
        let handlers: Vec<ViewportHandler> = self
            .viewport_handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(viewport);
        }
    }

    pub fn viewport_handler_count(&self) -> usize {
        self.viewport_handlers.lock().len()
    }
}

impl HostContainer for FakeHost {
    fn ready(&self) {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn expand(&self) {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn on_viewport_changed(&self, handler: ViewportHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.viewport_handlers.lock().push((id, handler));
        id
    }

    fn off_viewport_changed(&self, id: HandlerId) {
        self.viewport_handlers
            .lock()
            .retain(|(other, _)| *other != id);
    }
}

// ============================================================================
// FAKE CONNECTOR
// ============================================================================

pub struct FakeConnector {
    pub room: Arc<FakeRoomSession>,
    pub local: Arc<FakeLocalParticipant>,
    pub connects: Mutex<Vec<(String, String, AudioOptions)>>,
    fail_next: AtomicBool,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self {
            room: Arc::new(FakeRoomSession::new()),
            local: Arc::new(FakeLocalParticipant::new()),
            connects: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Lässt den nächsten Verbindungsaufbau scheitern
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RtcConnector for FakeConnector {
    async fn connect(
        &self,
        server_url: &str,
        token: &str,
        audio: AudioOptions,
    ) -> Result<ConnectedRoom, SessionError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SessionError::ConnectFailed("connection refused".to_string()));
        }

        self.connects
            .lock()
            .push((server_url.to_string(), token.to_string(), audio));

        Ok(ConnectedRoom {
            room: Arc::clone(&self.room) as Arc<dyn RoomSession>,
            local_participant: Arc::clone(&self.local) as Arc<dyn LocalParticipant>,
        })
    }
}

// ============================================================================
// FAKE API
// ============================================================================

pub struct FakeApi {
    params: Option<JoinRoomParams>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn returning(params: JoinRoomParams) -> Self {
        Self {
            params: Some(params),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            params: None,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl JoinApi for FakeApi {
    async fn join_params(&self, init_data: &str) -> Result<JoinRoomParams, ApiError> {
        self.requests.lock().push(init_data.to_string());
        match &self.params {
            Some(params) => Ok(params.clone()),
            None => Err(ApiError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
        }
    }
}

// ============================================================================
// FAKE DEVICE SOURCE
// ============================================================================

pub struct FakeDeviceSource {
    devices: Vec<AudioInputDevice>,
    deny: bool,
    delay: Option<Duration>,
}

impl FakeDeviceSource {
    pub fn granting(devices: Vec<AudioInputDevice>) -> Self {
        Self {
            devices,
            deny: false,
            delay: None,
        }
    }

    pub fn denying() -> Self {
        Self {
            devices: Vec::new(),
            deny: true,
            delay: None,
        }
    }

    /// Verzögert die Freigabe-Antwort (für Wettlauf-Tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl AudioDeviceSource for FakeDeviceSource {
    async fn request_access(&self) -> Result<(), DeviceError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.deny {
            Err(DeviceError::AccessDenied)
        } else {
            Ok(())
        }
    }

    async fn list_inputs(&self) -> Result<Vec<AudioInputDevice>, DeviceError> {
        Ok(self.devices.clone())
    }
}
