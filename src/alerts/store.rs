//! Alert Store
//!
//! Hält die geordnete Liste aktiver Alerts und ist der einzige Ort,
//! an dem sie verändert wird. Alerts ohne Aktion laufen nach ihrer
//! TTL automatisch ab; Alerts mit Aktion warten auf eine explizite
//! Bestätigung durch den Nutzer.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Standard-Lebensdauer eines Alerts ohne Aktion
pub const DEFAULT_ALERT_TTL: Duration = Duration::from_millis(4000);

// ============================================================================
// ALERT TYPES
// ============================================================================

/// Schweregrad eines Alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

/// Bestätigungs-Aktion eines Alerts
///
/// Ein Alert mit Aktion wird nie automatisch entfernt; erst die
/// Bestätigung entfernt ihn und löst den Callback aus.
#[derive(Clone)]
pub struct AlertAction {
    pub label: String,
    on_submit: Arc<dyn Fn() + Send + Sync>,
}

impl AlertAction {
    pub fn new(label: impl Into<String>, on_submit: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_submit: Arc::new(on_submit),
        }
    }

    fn submit(&self) {
        (self.on_submit)();
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("label", &self.label)
            .finish()
    }
}

/// Ein aktiver Alert
#[derive(Debug, Clone)]
pub struct Alert {
    /// Monoton steigende ID, wird nie wiederverwendet
    pub id: u64,
    pub message: String,
    pub severity: AlertSeverity,
    pub action: Option<AlertAction>,
}

/// Neuer Alert ohne ID (die ID vergibt der Store)
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub message: String,
    pub severity: AlertSeverity,
    pub action: Option<AlertAction>,
}

impl NewAlert {
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_severity(message, AlertSeverity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(message, AlertSeverity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(message, AlertSeverity::Error)
    }

    fn with_severity(message: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
            action: None,
        }
    }

    /// Hängt eine Bestätigungs-Aktion an (deaktiviert den Auto-Ablauf)
    pub fn with_action(
        mut self,
        label: impl Into<String>,
        on_submit: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.action = Some(AlertAction::new(label, on_submit));
        self
    }
}

/// Änderungs-Events des Stores (für die Render-Schicht)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStoreEvent {
    Pushed(u64),
    Dismissed(u64),
}

// ============================================================================
// ALERT STORE
// ============================================================================

/// Warteschlange aktiver Alerts (Anzeige-Reihenfolge = Ankunfts-Reihenfolge)
pub struct AlertStore {
    alerts: Arc<Mutex<Vec<Alert>>>,
    next_id: AtomicU64,
    event_tx: broadcast::Sender<AlertStoreEvent>,
}

impl AlertStore {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);

        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
            event_tx,
        }
    }

    /// Gibt einen Receiver für Änderungs-Events zurück
    pub fn subscribe(&self) -> broadcast::Receiver<AlertStoreEvent> {
        self.event_tx.subscribe()
    }

    /// Hängt einen Alert mit Standard-TTL an und gibt dessen ID zurück
    ///
    /// Muss innerhalb einer Tokio-Runtime laufen, da der Auto-Ablauf
    /// als eigenständiger Timer-Task gestartet wird.
    pub fn push(&self, alert: NewAlert) -> u64 {
        self.push_with_ttl(alert, DEFAULT_ALERT_TTL)
    }

    /// Hängt einen Alert mit eigener TTL an (z. B. 6000 ms für Gerätefehler)
    pub fn push_with_ttl(&self, alert: NewAlert, ttl: Duration) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let has_action = alert.action.is_some();

        self.alerts.lock().push(Alert {
            id,
            message: alert.message,
            severity: alert.severity,
            action: alert.action,
        });
        let _ = self.event_tx.send(AlertStoreEvent::Pushed(id));

        // Auto-Ablauf nur ohne Aktion; der Timer wird nie abgebrochen und
        // muss ein bereits entferntes Ziel tolerieren (dismiss ist idempotent).
        if !has_action {
            let alerts = Arc::clone(&self.alerts);
            let event_tx = self.event_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                if Self::remove(&alerts, id).is_some() {
                    let _ = event_tx.send(AlertStoreEvent::Dismissed(id));
                }
            });
        }

        id
    }

    /// Entfernt den Alert mit der angegebenen ID
    ///
    /// Kein Fehler, wenn die ID nicht (mehr) existiert; das deckt das
    /// Rennen zwischen Auto-Ablauf und manueller Entfernung ab.
    pub fn dismiss(&self, id: u64) {
        if Self::remove(&self.alerts, id).is_some() {
            let _ = self.event_tx.send(AlertStoreEvent::Dismissed(id));
        }
    }

    /// Bestätigt einen Alert: entfernt ihn und löst danach seine Aktion aus
    ///
    /// No-op, wenn die ID nicht existiert; der Callback feuert dadurch
    /// höchstens einmal.
    pub fn acknowledge(&self, id: u64) {
        let removed = Self::remove(&self.alerts, id);
        if let Some(alert) = removed {
            let _ = self.event_tx.send(AlertStoreEvent::Dismissed(id));
            if let Some(action) = alert.action {
                action.submit();
            }
        }
    }

    /// Momentaufnahme der aktiven Alerts in Ankunfts-Reihenfolge
    pub fn list(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    fn remove(alerts: &Mutex<Vec<Alert>>, id: u64) -> Option<Alert> {
        let mut alerts = alerts.lock();
        let index = alerts.iter().position(|a| a.id == id)?;
        Some(alerts.remove(index))
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AlertStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertStore")
            .field("alerts", &self.list())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::time;

    async fn advance(ms: u64) {
        time::advance(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_at_default_ttl() {
        let store = AlertStore::new();
        store.push(NewAlert::info("A joined"));

        advance(3999).await;
        assert_eq!(store.list().len(), 1);

        advance(2).await;
        assert!(store.list().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_with_custom_ttl() {
        let store = AlertStore::new();
        store.push_with_ttl(NewAlert::error("device failure"), Duration::from_millis(6000));

        advance(5999).await;
        assert_eq!(store.list().len(), 1);

        advance(2).await;
        assert!(store.list().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_actioned_alert_survives_timeout() {
        let store = AlertStore::new();
        let id = store.push(NewAlert::error("Room closed").with_action("Exit", || {}));

        advance(60_000).await;
        let alerts = store.list();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_unique_and_insertion_ordered() {
        let store = AlertStore::new();
        let first = store.push(NewAlert::info("first"));
        let second = store.push(NewAlert::info("second"));

        assert_ne!(first, second);
        assert!(second > first);

        let alerts = store.list();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "first");
        assert_eq!(alerts[1].message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_unknown_id_is_noop() {
        let store = AlertStore::new();
        store.push(NewAlert::info("hello"));

        store.dismiss(999);
        assert_eq!(store.list().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_races_with_timer() {
        let store = AlertStore::new();
        let id = store.push(NewAlert::info("hello"));

        store.dismiss(id);
        assert!(store.list().is_empty());

        // Timer feuert später ins Leere
        advance(5000).await;
        assert!(store.list().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_fires_action_once() {
        let store = AlertStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let id = store.push(NewAlert::error("Room closed").with_action("Exit", move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        store.acknowledge(id);
        assert!(store.list().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Zweite Bestätigung läuft ins Leere
        store.acknowledge(id);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_length_tracks_pushes_and_removals() {
        let store = AlertStore::new();
        let a = store.push(NewAlert::info("a"));
        let _b = store.push(NewAlert::warning("b"));
        let _c = store.push_with_ttl(NewAlert::info("c"), Duration::from_millis(1000));

        assert_eq!(store.list().len(), 3);

        store.dismiss(a);
        assert_eq!(store.list().len(), 2);

        advance(1001).await;
        assert_eq!(store.list().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_receives_push_and_dismiss() {
        let store = AlertStore::new();
        let mut rx = store.subscribe();

        let id = store.push(NewAlert::info("hello"));
        store.dismiss(id);

        assert_eq!(rx.try_recv().unwrap(), AlertStoreEvent::Pushed(id));
        assert_eq!(rx.try_recv().unwrap(), AlertStoreEvent::Dismissed(id));
    }
}
