pub mod book;
pub mod driver_duty;
pub mod driver_register;
pub mod home;
pub mod login;
pub mod profile;
pub mod services;
pub mod signup;
pub mod track_driver;
