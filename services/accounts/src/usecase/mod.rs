pub mod inbox;
pub mod register;
pub mod session;
pub mod username;
pub mod verify;
