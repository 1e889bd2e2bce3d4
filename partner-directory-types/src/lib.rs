//! Shared types for the partner directory service and its RPC clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Domain Types
// =====================================================

/// A business or community partner tracked by the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub partner_type: String,
    pub resources: String,
    pub contact_info: String,
}

/// A validated, complete partner payload ready for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPartner {
    pub name: String,
    #[serde(rename = "type")]
    pub partner_type: String,
    pub resources: String,
    pub contact_info: String,
}

// =====================================================
// RPC Request Types
// =====================================================

/// Payload for adding a partner.
///
/// Every field is optional so that an incomplete payload reaches the
/// validator and is rejected wholesale with a descriptive message,
/// instead of failing JSON deserialization field-by-field.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AddPartnerRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: Option<String>,
    pub resources: Option<String>,
    pub contact_info: Option<String>,
}

// =====================================================
// RPC Result Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AddPartnerResult {
    pub id: i64,
    /// Set when the record was persisted but its snapshot failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePartnerResult {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
}

/// Receipt for a completed snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupReceipt {
    pub path: String,
    pub timestamp: String,
}

/// Directory statistics overview
#[derive(Debug, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub total_partners: i64,
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub total_partners: i64,
    pub last_backup_at: Option<String>,
}

// =====================================================
// RPC Response Envelope
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
