mod booking;
mod expense;

pub use booking::BookingRecord;
pub use expense::ExpenseRecord;
