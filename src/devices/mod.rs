//! Devices Module - Mikrofon-Freigabe und Geräteauswahl
//!
//! Dieses Modul verwaltet:
//! - Den Freigabe-/Auswahl-Automaten des Pre-Join-Screens
//! - Die Aufzählung der Audio-Eingabegeräte
//!
//! Die eigentliche Geräte-API steckt hinter `AudioDeviceSource`, damit
//! der Automat gegen Fakes testbar bleibt.

mod cpal_source;
mod mic_setup;

use async_trait::async_trait;
use thiserror::Error;

pub use cpal_source::CpalDeviceSource;
pub use mic_setup::{MicSetup, MicSnapshot, MicState};

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug, Clone)]
pub enum DeviceError {
    #[error("Microphone access denied")]
    AccessDenied,

    #[error("No audio input device available")]
    NoDevice,

    #[error("Device enumeration failed: {0}")]
    Enumeration(String),
}

// ============================================================================
// DEVICE TYPES
// ============================================================================

/// Ein Audio-Eingabegerät
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInputDevice {
    /// Opaker Geräte-Bezeichner
    pub device_id: String,
    /// Menschenlesbares Label (kann vor erteilter Freigabe leer sein)
    pub label: String,
    /// Ist dies das Standard-Eingabegerät?
    pub is_default: bool,
}

// ============================================================================
// DEVICE SOURCE
// ============================================================================

/// Zugriff auf die Geräte-API der Plattform
#[async_trait]
pub trait AudioDeviceSource: Send + Sync {
    /// Fordert die Mikrofon-Freigabe an
    async fn request_access(&self) -> Result<(), DeviceError>;

    /// Listet die verfügbaren Eingabegeräte auf
    async fn list_inputs(&self) -> Result<Vec<AudioInputDevice>, DeviceError>;
}
