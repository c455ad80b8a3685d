//! Domain enums and small value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reorder lifecycle status
///
/// ```text
/// pending --(mark ordered)--> ordered --(mark received)--> received [terminal]
/// pending --(cancel)------------------------------------> cancelled [terminal]
/// ordered --(cancel)------------------------------------> cancelled [terminal]
/// ```
///
/// A direct `pending -> received` jump is allowed (small shops often skip the
/// "ordered" bookkeeping step and mark the delivery straight away).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderStatus {
    Pending,
    Ordered,
    Received,
    Cancelled,
}

impl ReorderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Received | Self::Cancelled)
    }

    /// An open reorder still counts against the one-per-product invariant
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Ordered)
    }

    /// Forward-only state machine check
    pub fn can_transition_to(&self, next: ReorderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Ordered)
                | (Self::Pending, Self::Received)
                | (Self::Pending, Self::Cancelled)
                | (Self::Ordered, Self::Received)
                | (Self::Ordered, Self::Cancelled)
        )
    }
}

impl fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReorderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ordered" => Ok(Self::Ordered),
            "received" => Ok(Self::Received),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown reorder status: {other}")),
        }
    }
}

/// Why a reorder was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    LowStock,
    Manual,
    Scheduled,
}

impl TriggerReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowStock => "low_stock",
            Self::Manual => "manual",
            Self::Scheduled => "scheduled",
        }
    }
}

/// Request actor role
///
/// Procurement mutations (manual reorders, status transitions) require
/// manager or above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff,
    Manager,
    Admin,
}

impl Role {
    pub fn can_manage_procurement(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Supplier contact details
///
/// Snapshotted onto each reorder at creation time so later edits to the
/// product do not rewrite procurement history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_machine_is_forward_only() {
        use ReorderStatus::*;
        assert!(Pending.can_transition_to(Ordered));
        assert!(Pending.can_transition_to(Received));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Ordered.can_transition_to(Received));
        assert!(Ordered.can_transition_to(Cancelled));

        assert!(!Ordered.can_transition_to(Pending));
        assert!(!Received.can_transition_to(Pending));
        assert!(!Received.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn status_serde_round_trip() {
        let json = serde_json::to_string(&ReorderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: ReorderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, ReorderStatus::Cancelled);
    }

    #[test]
    fn trigger_reason_wire_format() {
        let json = serde_json::to_string(&TriggerReason::LowStock).unwrap();
        assert_eq!(json, "\"low_stock\"");
    }

    #[test]
    fn role_permissions() {
        assert!(!Role::Staff.can_manage_procurement());
        assert!(Role::Manager.can_manage_procurement());
        assert!(Role::Admin.can_manage_procurement());
    }
}
