pub mod availability;
pub mod reminder;
pub mod reservation;

#[cfg(test)]
pub(crate) mod testing;
