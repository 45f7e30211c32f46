pub mod auth;
pub mod course;
pub mod device;
pub mod lessons;
pub mod progress;
