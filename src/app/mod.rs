//! 业务层

pub mod catalog;
pub mod orders;
pub mod seeder;
