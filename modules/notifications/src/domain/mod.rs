pub mod calendar;
pub mod error;
pub mod messages;
pub mod ports;
pub mod repo;
pub mod scanner;
pub mod service;
