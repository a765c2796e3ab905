//! Mikrofon-Setup des Pre-Join-Screens
//!
//! Kleiner Automat über {Disabled, Requesting, Denied, Ready}: Der Nutzer
//! schaltet das Mikrofon ein, die Freigabe wird angefordert, bei Erfolg
//! werden die Geräte aufgezählt und das erste ausgewählt. Scheitert die
//! Freigabe, fällt der Schalter zurück auf "aus".
//!
//! Reentrante Toggles während einer laufenden Anfrage sind erlaubt; ein
//! Generationszähler sorgt dafür, dass nur der jüngste Übergang gewinnt
//! und veraltete Ergebnisse verworfen werden.

use super::{AudioDeviceSource, AudioInputDevice};
use parking_lot::Mutex;
use std::sync::Arc;

// ============================================================================
// STATE
// ============================================================================

/// Zustand der Mikrofon-Freigabe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicState {
    /// Mikrofon ist aus
    Disabled,
    /// Freigabe-Anfrage läuft
    Requesting,
    /// Freigabe wurde verweigert, Mikrofon bleibt aus
    Denied,
    /// Freigabe erteilt, Geräte stehen bereit
    Ready,
}

/// Momentaufnahme für die Render-Schicht
#[derive(Debug, Clone)]
pub struct MicSnapshot {
    pub state: MicState,
    pub devices: Vec<AudioInputDevice>,
    pub selected_device: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug)]
struct Inner {
    state: MicState,
    devices: Vec<AudioInputDevice>,
    selected_device: Option<String>,
    error: Option<String>,
    generation: u64,
}

// ============================================================================
// MIC SETUP
// ============================================================================

/// Freigabe- und Auswahl-Automat für das Mikrofon
pub struct MicSetup {
    source: Arc<dyn AudioDeviceSource>,
    inner: Mutex<Inner>,
}

impl MicSetup {
    pub fn new(source: Arc<dyn AudioDeviceSource>) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: MicState::Disabled,
                devices: Vec::new(),
                selected_device: None,
                error: None,
                generation: 0,
            }),
        }
    }

    /// Schaltet das Mikrofon um
    ///
    /// Einschalten stößt die Freigabe-Anfrage und die Geräte-Aufzählung
    /// an; Ausschalten gilt sofort. Jeder Übergang erhöht die Generation,
    /// wodurch noch laufende Anfragen ihr Ergebnis verlieren.
    pub async fn toggle_microphone(&self) {
        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;

            match inner.state {
                MicState::Requesting | MicState::Ready => {
                    inner.state = MicState::Disabled;
                    return;
                }
                MicState::Disabled | MicState::Denied => {
                    inner.state = MicState::Requesting;
                    inner.error = None;
                }
            }
            inner.generation
        };

        let outcome = match self.source.request_access().await {
            Ok(()) => self.source.list_inputs().await,
            Err(err) => Err(err),
        };

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            // Ein späterer Toggle hat gewonnen; Ergebnis verwerfen
            tracing::debug!("mic setup: dropping stale permission result");
            return;
        }

        match outcome {
            Ok(devices) => {
                let devices = with_fallback_labels(devices);
                if inner.selected_device.is_none() {
                    inner.selected_device = initial_selection(&devices);
                }
                inner.devices = devices;
                inner.state = MicState::Ready;
            }
            Err(err) => {
                tracing::warn!("microphone access failed: {}", err);
                inner.state = MicState::Denied;
                inner.error = Some(err.to_string());
            }
        }
    }

    /// Aktualisiert die Geräteliste ohne Freigabe-Anfrage
    ///
    /// Für den initialen Aufbau des Pre-Join-Screens; Labels können vor
    /// erteilter Freigabe leer sein und werden synthetisiert.
    pub async fn refresh_devices(&self) {
        match self.source.list_inputs().await {
            Ok(devices) => {
                let devices = with_fallback_labels(devices);
                let mut inner = self.inner.lock();
                if inner.selected_device.is_none() {
                    inner.selected_device = initial_selection(&devices);
                }
                inner.devices = devices;
            }
            Err(err) => {
                tracing::warn!("device refresh failed: {}", err);
            }
        }
    }

    /// Wählt ein Eingabegerät aus
    pub fn select_device(&self, device_id: impl Into<String>) {
        self.inner.lock().selected_device = Some(device_id.into());
    }

    /// Darf der Nutzer beitreten?
    ///
    /// Mit ausgeschaltetem Mikrofon immer; mit eingeschaltetem erst,
    /// wenn die Freigabe erteilt und ein Gerät gewählt ist.
    pub fn can_join(&self) -> bool {
        let inner = self.inner.lock();
        match inner.state {
            MicState::Disabled | MicState::Denied => true,
            MicState::Requesting => false,
            MicState::Ready => inner.selected_device.is_some(),
        }
    }

    /// Ist das Mikrofon (aus Nutzersicht) eingeschaltet?
    pub fn is_enabled(&self) -> bool {
        matches!(
            self.inner.lock().state,
            MicState::Requesting | MicState::Ready
        )
    }

    /// Momentaufnahme für die Render-Schicht
    pub fn snapshot(&self) -> MicSnapshot {
        let inner = self.inner.lock();
        MicSnapshot {
            state: inner.state,
            devices: inner.devices.clone(),
            selected_device: inner.selected_device.clone(),
            error: inner.error.clone(),
        }
    }
}

impl std::fmt::Debug for MicSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicSetup")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Ersetzt leere Labels durch "Microphone N" (1-basiert)
fn with_fallback_labels(devices: Vec<AudioInputDevice>) -> Vec<AudioInputDevice> {
    devices
        .into_iter()
        .enumerate()
        .map(|(index, mut device)| {
            if device.label.trim().is_empty() {
                device.label = format!("Microphone {}", index + 1);
            }
            device
        })
        .collect()
}

/// Standardgerät, sonst das erste der Liste
fn initial_selection(devices: &[AudioInputDevice]) -> Option<String> {
    devices
        .iter()
        .find(|d| d.is_default)
        .or_else(|| devices.first())
        .map(|d| d.device_id.clone())
}

// ============================================================================
// TESTS
// ============================================================================
