//! Host Module - Lebenszyklus des umgebenden Containers
//!
//! Der Mini-App-Container (Telegram-artige Hülle) wird als Capability-
//! Trait modelliert: ein "ready"- und ein "expand"-Signal beim Start,
//! ein "close"-Signal bei fatalem Ende oder explizitem Verlassen, dazu
//! Viewport-Maße in CSS-Pixeln und der opake Initialisierungs-Payload
//! für den Join-Parameter-Abruf.

use crate::session::HandlerId;
use std::sync::Arc;

// ============================================================================
// VIEWPORT
// ============================================================================

/// Viewport-Maße in CSS-Pixeln
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Handler für Viewport-Änderungen
pub type ViewportHandler = Arc<dyn Fn(Viewport) + Send + Sync>;

// ============================================================================
// HOST CONTAINER
// ============================================================================

/// Capability-Trait des Host-Containers
pub trait HostContainer: Send + Sync {
    /// Meldet dem Container, dass die App bereit ist
    fn ready(&self);

    /// Bittet den Container, den Viewport zu maximieren
    fn expand(&self);

    /// Schließt die App im Container
    fn close(&self);

    /// Opaker Initialisierungs-Payload des Containers
    ///
    /// Wird unverändert als Bearer-Token an den Join-Parameter-Endpoint
    /// durchgereicht; der Kern interpretiert ihn nicht.
    fn init_data(&self) -> String;

    /// Registriert einen Handler für Viewport-Änderungen
    fn on_viewport_changed(&self, handler: ViewportHandler) -> HandlerId;

    /// Meldet einen Viewport-Handler wieder ab (idempotent)
    fn off_viewport_changed(&self, id: HandlerId);
}
