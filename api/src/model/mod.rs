pub mod availability;
pub mod reservation;
pub mod room;
pub mod user;
