//! Alerts Module - Benachrichtigungen des Call-UIs
//!
//! Dieses Modul verwaltet:
//! - Die Warteschlange aktiver Alerts (Store)
//! - Die Übersetzung von Session-Events in Alerts (Bridge)
//!
//! Die Render-Schicht liest ausschließlich Snapshots über `list()` und
//! hört auf den Change-Feed des Stores.

mod bridge;
mod store;

pub use bridge::AlertBridge;
pub use store::{
    Alert, AlertAction, AlertSeverity, AlertStore, AlertStoreEvent, NewAlert, DEFAULT_ALERT_TTL,
};
