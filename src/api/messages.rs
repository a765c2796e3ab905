//! DTOs des Join-Parameter-Endpoints
//!
//! Die Feldnamen spiegeln die JSON-Antwort des Backends (camelCase)
//! und ermöglichen typsichere Kommunikation.

use serde::{Deserialize, Serialize};

/// Antwort von `GET /api/1/room-info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomParams {
    /// URL des Medien-Servers
    #[serde(rename = "serverUrl")]
    pub server_url: String,

    /// Zugangs-Token für den Raum
    pub token: String,

    /// Bevorzugtes Sprach-Tag des Nutzers (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

// ============================================================================
// TESTS
// ============================================================================
