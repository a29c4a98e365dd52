pub mod accounts;
pub mod messages;
