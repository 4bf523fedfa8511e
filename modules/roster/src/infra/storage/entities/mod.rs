pub mod payment;
pub mod player;
pub mod team;
