pub mod booking;
pub mod customer_email;
pub mod customer_name;
pub mod phone_number;

pub use booking::{BookingForm, CustomerForm, FieldError, ValidBooking};
pub use customer_email::CustomerEmail;
pub use customer_name::CustomerName;
pub use phone_number::CustomerPhone;
