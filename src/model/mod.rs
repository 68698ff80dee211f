pub mod employee;
pub mod passport;
