pub mod extract;
pub mod messages;
pub mod session;
pub mod sign_up;
pub mod verify;
