//! Lifecycle states for orders, requirements and applications.

use serde::{Deserialize, Serialize};

/// Order workflow state.
///
/// Wire format: `u8` (0 = Pending, 1 = InProgress, 2 = NearlyDone,
/// 3 = Completed, 4 = Cancelled). COMPLETED and CANCELLED are terminal;
/// an order in a terminal state no longer counts as active for the
/// one-active-order-per-(service, client) rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending = 0,
    InProgress = 1,
    NearlyDone = 2,
    Completed = 3,
    Cancelled = 4,
}

impl OrderStatus {
    /// The non-terminal states, i.e. what "active order" means.
    pub const ACTIVE: [OrderStatus; 3] = [Self::Pending, Self::InProgress, Self::NearlyDone];

    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::InProgress),
            2 => Some(Self::NearlyDone),
            3 => Some(Self::Completed),
            4 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Requirement lifecycle state.
///
/// Wire format: `u8` (0 = Open, 1 = Closed, 2 = Deleted). CLOSED and
/// DELETED are terminal. DELETED is a soft delete; deleted requirements
/// read as absent everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    Open = 0,
    Closed = 1,
    Deleted = 2,
}

impl RequirementStatus {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Open),
            1 => Some(Self::Closed),
            2 => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Deleted)
    }
}

/// Application state on a requirement.
///
/// Wire format: `u8` (0 = Pending, 1 = Accepted). Applications are never
/// rejected individually; siblings of an accepted application simply stay
/// PENDING on a closed requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending = 0,
    Accepted = 1,
}

impl ApplicationStatus {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::Accepted),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
