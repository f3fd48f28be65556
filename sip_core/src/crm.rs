//! # CRM List
//!
//! A lightweight list of quoted clients kept alongside the project state.
//! Each entry snapshots the final total of the quote it was recorded from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sales stage of a quoted client
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CrmStatus {
    #[default]
    Nuevo,
    Enviado,
    Negociacion,
    Ganado,
    Perdido,
}

impl CrmStatus {
    pub const ALL: [CrmStatus; 5] = [
        CrmStatus::Nuevo,
        CrmStatus::Enviado,
        CrmStatus::Negociacion,
        CrmStatus::Ganado,
        CrmStatus::Perdido,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CrmStatus::Nuevo => "Nuevo",
            CrmStatus::Enviado => "Enviado",
            CrmStatus::Negociacion => "Negociación",
            CrmStatus::Ganado => "Ganado",
            CrmStatus::Perdido => "Perdido",
        }
    }

    /// Still in the pipeline (not won or lost)
    pub fn is_open(&self) -> bool {
        !matches!(self, CrmStatus::Ganado | CrmStatus::Perdido)
    }
}

impl std::fmt::Display for CrmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmEntry {
    pub id: Uuid,
    pub client: String,
    pub contact: String,
    pub location: String,
    pub status: CrmStatus,
    /// Final total of the recorded quote
    pub total: f64,
    pub created: DateTime<Utc>,
    pub notes: String,
}

impl Default for CrmEntry {
    fn default() -> Self {
        CrmEntry::new("", "", "", 0.0)
    }
}

impl CrmEntry {
    pub fn new(client: impl Into<String>, contact: impl Into<String>, location: impl Into<String>, total: f64) -> Self {
        CrmEntry {
            id: Uuid::new_v4(),
            client: client.into(),
            contact: contact.into(),
            location: location.into(),
            status: CrmStatus::Nuevo,
            total,
            created: Utc::now(),
            notes: String::new(),
        }
    }
}

/// Sum of recorded totals per status, in [`CrmStatus::ALL`] order.
pub fn total_by_status(entries: &[CrmEntry]) -> Vec<(CrmStatus, f64)> {
    CrmStatus::ALL
        .into_iter()
        .map(|status| {
            let sum = entries
                .iter()
                .filter(|e| e.status == status && e.total.is_finite())
                .map(|e| e.total)
                .sum();
            (status, sum)
        })
        .collect()
}
