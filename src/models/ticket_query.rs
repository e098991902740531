// ============================================================================
// TICKET QUERY - Alcance del listado staff
// ============================================================================
// El alcance (asignados / creados / división) viaja como query params al
// backend; el filtro de status se aplica en el cliente.
// ============================================================================

use std::fmt;

use crate::errors::WorkflowError;
use crate::models::auth::{StaffRole, StaffUser};
use crate::models::ticket::{Ticket, TicketStatus};
use crate::utils::constants::DIVISIONS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TicketView {
    AssignedToMe,
    CreatedByMe,
    Division(String),
}

impl TicketView {
    pub fn label(&self) -> String {
        match self {
            TicketView::AssignedToMe => "Assigned to me".to_string(),
            TicketView::CreatedByMe => "Created by me".to_string(),
            TicketView::Division(division) => format!("Division: {}", division),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Todo menos los cerrados
    #[default]
    Active,
    Only(TicketStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 5] = [
        StatusFilter::Active,
        StatusFilter::Only(TicketStatus::Open),
        StatusFilter::Only(TicketStatus::InProgress),
        StatusFilter::Only(TicketStatus::Paused),
        StatusFilter::Only(TicketStatus::Closed),
    ];

    /// Un status desconocido pasa el filtro por defecto para que el error
    /// de datos siga visible
    pub fn keeps(self, ticket: &Ticket) -> bool {
        match self {
            StatusFilter::Active => ticket.status != TicketStatus::Closed.as_str(),
            StatusFilter::Only(status) => ticket.status == status.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::Active => "All active",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Consulta del listado staff, siempre atada al usuario que la pidió
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketQuery {
    username: String,
    view: TicketView,
    status: StatusFilter,
}

impl TicketQuery {
    /// Asignados al usuario, sin cerrados
    pub fn default_for(user: &StaffUser) -> Self {
        Self {
            username: user.username.clone(),
            view: TicketView::AssignedToMe,
            status: StatusFilter::default(),
        }
    }

    /// Un employee solo ve su división; un manager, todas
    pub fn available_views(user: &StaffUser) -> Vec<TicketView> {
        let mut views = vec![TicketView::AssignedToMe, TicketView::CreatedByMe];
        match user.role {
            StaffRole::Manager => views.extend(
                DIVISIONS
                    .iter()
                    .map(|division| TicketView::Division(division.to_string())),
            ),
            StaffRole::Employee => views.push(TicketView::Division(user.division.clone())),
        }
        views
    }

    pub fn for_staff(
        user: &StaffUser,
        view: TicketView,
        status: StatusFilter,
    ) -> Result<Self, WorkflowError> {
        if !Self::available_views(user).contains(&view) {
            let division = match &view {
                TicketView::Division(division) => division.clone(),
                _ => user.division.clone(),
            };
            log::warn!("🚫 [TICKETS] {} no puede consultar la división {}", user.username, division);
            return Err(WorkflowError::ScopeNotAllowed { division });
        }
        Ok(Self {
            username: user.username.clone(),
            view,
            status,
        })
    }

    pub fn view(&self) -> &TicketView {
        &self.view
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// El filtro de status no cambia el alcance: no hace falta revalidar
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn belongs_to(&self, user: &StaffUser) -> bool {
        self.username == user.username
    }

    /// Query params de `GET /api/tickets`
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match &self.view {
            TicketView::AssignedToMe => vec![("assigned_to", self.username.clone())],
            TicketView::CreatedByMe => vec![("created_by", self.username.clone())],
            TicketView::Division(division) => vec![("division", division.clone())],
        }
    }

    pub fn keeps(&self, ticket: &Ticket) -> bool {
        self.status.keeps(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{alice, ticket};

    fn carol() -> StaffUser {
        StaffUser {
            username: "carol".to_string(),
            division: "networking".to_string(),
            role: StaffRole::Manager,
        }
    }

    #[test]
    fn default_scope_is_my_assigned_tickets() {
        let query = TicketQuery::default_for(&alice());
        assert_eq!(query.view(), &TicketView::AssignedToMe);
        assert_eq!(query.query_params(), vec![("assigned_to", "alice".to_string())]);
    }

    #[test]
    fn employee_cannot_request_another_division() {
        let err = TicketQuery::for_staff(
            &alice(),
            TicketView::Division("networking".to_string()),
            StatusFilter::Active,
        )
        .unwrap_err();
        assert_eq!(err, WorkflowError::ScopeNotAllowed { division: "networking".to_string() });

        let own = TicketQuery::for_staff(
            &alice(),
            TicketView::Division("cloud".to_string()),
            StatusFilter::Active,
        )
        .unwrap();
        assert_eq!(own.query_params(), vec![("division", "cloud".to_string())]);
    }

    #[test]
    fn manager_can_pick_any_division() {
        for division in DIVISIONS {
            let query = TicketQuery::for_staff(
                &carol(),
                TicketView::Division(division.to_string()),
                StatusFilter::Active,
            )
            .unwrap();
            assert_eq!(query.query_params(), vec![("division", division.to_string())]);
        }
        assert!(TicketQuery::for_staff(
            &carol(),
            TicketView::Division("marketing".to_string()),
            StatusFilter::Active
        )
        .is_err());
    }

    #[test]
    fn created_by_me_uses_the_username() {
        let query =
            TicketQuery::for_staff(&alice(), TicketView::CreatedByMe, StatusFilter::Active).unwrap();
        assert_eq!(query.query_params(), vec![("created_by", "alice".to_string())]);
    }

    #[test]
    fn closed_tickets_are_excluded_by_default() {
        let query = TicketQuery::default_for(&alice());
        assert!(query.keeps(&ticket(1, "open")));
        assert!(query.keeps(&ticket(2, "paused")));
        assert!(!query.keeps(&ticket(3, "closed")));
        // Dato corrupto: sigue visible con su marca de error
        assert!(query.keeps(&ticket(4, "archived")));
    }

    #[test]
    fn explicit_status_filter_shows_only_that_status() {
        let query = TicketQuery::default_for(&alice()).with_status(StatusFilter::Only(TicketStatus::Closed));
        assert!(query.keeps(&ticket(3, "closed")));
        assert!(!query.keeps(&ticket(1, "open")));
    }
}
