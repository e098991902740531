// ============================================================================
// TICKET - Modelo + máquina de estados (workflow gate)
// ============================================================================
// open -> in-progress -> paused <-> in-progress -> closed
// El gate solo decide qué acciones se muestran; la transición la ejecuta
// el backend (ver TicketViewModel).
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::WorkflowError;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Ticket {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    /// String crudo: puede traer valores fuera de la máquina de estados
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    InProgress,
    Paused,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Paused => "paused",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn allowed_actions(self) -> &'static [TicketAction] {
        match self {
            TicketStatus::Open => &[TicketAction::Start],
            TicketStatus::InProgress => &[TicketAction::Pause, TicketAction::Close],
            TicketStatus::Paused => &[TicketAction::Resume, TicketAction::Close],
            TicketStatus::Closed => &[],
        }
    }

    pub fn permits(self, action: TicketAction) -> bool {
        self.allowed_actions().contains(&action)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_actions().is_empty()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in-progress" => Ok(TicketStatus::InProgress),
            "paused" => Ok(TicketStatus::Paused),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TicketAction {
    Start,
    Pause,
    Resume,
    Close,
}

impl TicketAction {
    pub fn target(self) -> TicketStatus {
        match self {
            TicketAction::Start | TicketAction::Resume => TicketStatus::InProgress,
            TicketAction::Pause => TicketStatus::Paused,
            TicketAction::Close => TicketStatus::Closed,
        }
    }

    /// Cerrar es irreversible: pide confirmación explícita
    pub fn requires_confirmation(self) -> bool {
        matches!(self, TicketAction::Close)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TicketAction::Start => "start",
            TicketAction::Pause => "pause",
            TicketAction::Resume => "resume",
            TicketAction::Close => "close",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketAction::Start => "▶️ Start",
            TicketAction::Pause => "⏸️ Pause",
            TicketAction::Resume => "🔄 Resume",
            TicketAction::Close => "✅ Close",
        }
    }
}

impl fmt::Display for TicketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Ticket {
    pub fn parsed_status(&self) -> Result<TicketStatus, WorkflowError> {
        self.status
            .parse()
            .map_err(|status| WorkflowError::UnknownStatus {
                ticket_id: self.id,
                status,
            })
    }
}

/// Acciones expuestas para un ticket. Un status desconocido es un error de
/// datos y se reporta por consola, nunca se traduce en "sin acciones".
pub fn permitted_actions(ticket: &Ticket) -> Result<&'static [TicketAction], WorkflowError> {
    match ticket.parsed_status() {
        Ok(status) => Ok(status.allowed_actions()),
        Err(e) => {
            log::error!("❌ [TICKETS] Data integrity: {}", e);
            Err(e)
        }
    }
}
