pub mod booking;
pub mod walk;
pub mod walker;
