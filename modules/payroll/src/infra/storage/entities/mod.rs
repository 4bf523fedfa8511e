pub mod player_salary;
pub mod salary_payment;
pub mod salary_player;
pub mod staff;
pub mod staff_payment;
