pub mod id;
pub mod period;
pub mod reservation;
pub mod role;
pub mod room;
pub mod user;
