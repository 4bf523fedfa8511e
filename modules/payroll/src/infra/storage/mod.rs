pub mod entities;
pub mod migrations;
pub mod repo;
