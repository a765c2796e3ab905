//! Voice Room - Sprachraum-Client für Mini-App-Container
//!
//! Ein Sprachanruf-Client mit:
//! - Alert Store und Event Bridge für Nutzer-Benachrichtigungen
//! - Mikrofon-Freigabe und Geräteauswahl vor dem Beitritt
//! - Join-Parametern vom Backend (REST mit Bearer-Auth)
//! - Host-Container-Lebenszyklus (ready, expand, close, Viewport)
//! - UI-Übersetzungen über Fluent (en, ru, ua)

pub mod alerts;
pub mod api;
pub mod call;
pub mod devices;
pub mod host;
pub mod i18n;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use alerts::{Alert, AlertBridge, AlertStore, NewAlert};
pub use api::{ApiClient, JoinApi, JoinRoomParams};
pub use call::{CallApp, CallPhase, PreJoinChoice};
pub use devices::{CpalDeviceSource, MicSetup};
pub use host::{HostContainer, Viewport};
pub use i18n::I18n;
pub use session::{ConnectedRoom, RoomSession, RtcConnector};

/// Initialisiert das Logging
///
/// `RUST_LOG` übersteuert den Default; ohne Umgebungsvariable loggt das
/// Crate auf `debug`.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("voice_room=debug".parse()?),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    tracing::info!("Initializing Voice Room...");
    Ok(())
}
