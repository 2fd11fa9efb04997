pub mod booked;
pub mod booking;
pub mod home;
pub mod info;
pub mod login;
pub mod packages;
pub mod register;
