pub mod actor;
pub mod auth;
pub mod ticket;
pub mod ticket_query;

pub use actor::{ActorKind, Client, HttpMethod, Staff};
pub use auth::{
    ClientCredentials, ClientUser, CredentialUpdate, ErrorBody, LoginGrant, StaffCredentials,
    StaffRole, StaffUser,
};
pub use ticket::{permitted_actions, Ticket, TicketAction, TicketStatus};
pub use ticket_query::{StatusFilter, TicketQuery, TicketView};
