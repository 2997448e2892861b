//! Jira API access: client, pagination, concurrent fetching and filters.

pub mod api_types;
pub mod client;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod pages;
pub mod status;
pub mod types;

pub use client::JiraClient;
pub use error::JiraError;
pub use fetch::FetchOutcome;
pub use filters::AssigneeFilter;
pub use types::Ticket;
