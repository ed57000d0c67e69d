pub mod bookings;
pub mod periods;
pub mod reports;
pub mod taxes;
