//! Anruf-Orchestrierung
//!
//! `CallApp` hält den Seiten-Zustand (Loading, Pre-Join, In-Call, Ended)
//! und verdrahtet Host-Container, Backend, Connector und Alert Store.
//! Alle externen Mitspieler stecken hinter Traits; die Orchestrierung
//! selbst ist dadurch vollständig gegen Fakes testbar.

use crate::alerts::{AlertBridge, AlertStore};
use crate::api::{ApiError, JoinApi, JoinRoomParams};
use crate::host::{HostContainer, Viewport, ViewportHandler};
use crate::i18n::I18n;
use crate::session::{
    AudioOptions, ConnectionState, HandlerId, LocalParticipant, MediaDeviceKind, ParticipantInfo,
    RoomSession, RtcConnector, SessionError,
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug)]
pub enum CallAppError {
    #[error("failed to fetch join params: {0}")]
    Api(#[from] ApiError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("join params not loaded yet")]
    NotReady,

    #[error("no active call")]
    NoActiveCall,
}

// ============================================================================
// PHASES
// ============================================================================

/// Seiten-Phase des Anrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Join-Parameter werden geladen
    Loading,
    /// Pre-Join-Screen: Name und Mikrofon wählen
    PreJoin,
    /// Aktiver Anruf
    InCall,
    /// Anruf beendet
    Ended,
}

/// Auswahl des Nutzers auf dem Pre-Join-Screen
#[derive(Debug, Clone)]
pub struct PreJoinChoice {
    pub username: String,
    pub audio_enabled: bool,
    pub audio_device_id: Option<String>,
}

// ============================================================================
// CALL APP
// ============================================================================

/// Zentrale Orchestrierung eines Anrufs
pub struct CallApp {
    api: Arc<dyn JoinApi>,
    host: Arc<dyn HostContainer>,
    connector: Arc<dyn RtcConnector>,
    alerts: Arc<AlertStore>,
    i18n: Mutex<I18n>,

    started: AtomicBool,
    phase: RwLock<CallPhase>,
    join_params: RwLock<Option<JoinRoomParams>>,
    username: RwLock<String>,

    room: RwLock<Option<Arc<dyn RoomSession>>>,
    local: RwLock<Option<Arc<dyn LocalParticipant>>>,
    bridge: Mutex<Option<AlertBridge>>,

    viewport: Arc<RwLock<Viewport>>,
    viewport_handler: Mutex<Option<HandlerId>>,
}

impl CallApp {
    pub fn new(
        api: Arc<dyn JoinApi>,
        host: Arc<dyn HostContainer>,
        connector: Arc<dyn RtcConnector>,
        alerts: Arc<AlertStore>,
    ) -> Self {
        Self {
            api,
            host,
            connector,
            alerts,
            i18n: Mutex::new(I18n::new()),
            started: AtomicBool::new(false),
            phase: RwLock::new(CallPhase::Loading),
            join_params: RwLock::new(None),
            username: RwLock::new(String::new()),
            room: RwLock::new(None),
            local: RwLock::new(None),
            bridge: Mutex::new(None),
            viewport: Arc::new(RwLock::new(Viewport::default())),
            viewport_handler: Mutex::new(None),
        }
    }

    /// Startet die App im Host-Container
    ///
    /// Meldet "ready" und "expand" genau einmal, registriert den
    /// Viewport-Handler und holt die Join-Parameter. Schlägt der Abruf
    /// fehl, bleibt die Phase `Loading`; ein erneuter Aufruf versucht
    /// nur den Abruf noch einmal.
    pub async fn start(&self) -> Result<(), CallAppError> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.host.ready();
            self.host.expand();

            let viewport = Arc::clone(&self.viewport);
            let handler: ViewportHandler = Arc::new(move |dimensions| {
                *viewport.write() = dimensions;
            });
            *self.viewport_handler.lock() = Some(self.host.on_viewport_changed(handler));
        }

        let init_data = self.host.init_data();
        let params = self.api.join_params(&init_data).await?;
        tracing::info!("join params loaded, server {}", params.server_url);

        if let Some(language) = &params.language {
            self.i18n.lock().set_preferred(language);
        }

        *self.join_params.write() = Some(params);
        *self.phase.write() = CallPhase::PreJoin;
        Ok(())
    }

    /// Betritt den Raum mit der Pre-Join-Auswahl
    pub async fn join(&self, choice: PreJoinChoice) -> Result<(), CallAppError> {
        let params = self
            .join_params
            .read()
            .clone()
            .ok_or(CallAppError::NotReady)?;

        let audio = AudioOptions {
            enabled: choice.audio_enabled,
            device_id: choice.audio_device_id,
        };
        let connected = self
            .connector
            .connect(&params.server_url, &params.token, audio)
            .await?;

        *self.username.write() = choice.username;
        *self.room.write() = Some(Arc::clone(&connected.room));
        *self.local.write() = Some(Arc::clone(&connected.local_participant));

        *self.bridge.lock() = Some(AlertBridge::attach(
            Some(connected.room),
            Some(connected.local_participant),
            Arc::clone(&self.alerts),
            Arc::clone(&self.host),
        ));

        *self.phase.write() = CallPhase::InCall;
        tracing::info!("joined room");
        Ok(())
    }

    /// Schaltet das Mikrofon im aktiven Anruf um
    ///
    /// Liefert den neuen Zustand (eingeschaltet?).
    pub fn toggle_mute(&self) -> Result<bool, CallAppError> {
        let room = self.room.read().clone().ok_or(CallAppError::NoActiveCall)?;
        let local = self.local.read().clone().ok_or(CallAppError::NoActiveCall)?;

        let enable = local.is_microphone_muted();
        room.set_microphone_enabled(enable);
        Ok(enable)
    }

    /// Wechselt das aktive Mikrofon im Anruf
    pub fn switch_microphone(&self, device_id: &str) -> Result<(), CallAppError> {
        let room = self.room.read().clone().ok_or(CallAppError::NoActiveCall)?;
        room.switch_active_device(MediaDeviceKind::AudioInput, device_id);
        Ok(())
    }

    /// Verlässt den Anruf und schließt die App im Container
    ///
    /// Reihenfolge: Bridge abhängen, Verbindung trennen,
    /// Viewport-Handler abmelden, Container schließen.
    pub fn leave(&self) {
        if let Some(mut bridge) = self.bridge.lock().take() {
            bridge.detach();
        }

        if let Some(room) = self.room.write().take() {
            room.disconnect();
        }
        self.local.write().take();

        if let Some(id) = self.viewport_handler.lock().take() {
            self.host.off_viewport_changed(id);
        }

        self.host.close();
        *self.phase.write() = CallPhase::Ended;
        tracing::info!("left room");
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    pub fn phase(&self) -> CallPhase {
        *self.phase.read()
    }

    pub fn username(&self) -> String {
        self.username.read().clone()
    }

    pub fn viewport(&self) -> Viewport {
        *self.viewport.read()
    }

    /// Übersetzt einen UI-Schlüssel in der aktiven Sprache
    pub fn tr(&self, key: &str) -> String {
        self.i18n.lock().tr(key)
    }

    pub fn connection_state(&self) -> ConnectionState {
        match self.room.read().as_ref() {
            Some(room) => room.connection_state(),
            None => ConnectionState::Disconnected,
        }
    }

    pub fn remote_participants(&self) -> Vec<ParticipantInfo> {
        match self.room.read().as_ref() {
            Some(room) => room.remote_participants(),
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for CallApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallApp")
            .field("phase", &self.phase())
            .field("username", &self.username())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
