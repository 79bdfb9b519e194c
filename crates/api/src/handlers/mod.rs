pub mod company;
pub mod document;
pub mod health;
pub mod project;
pub mod task;
pub mod user;
