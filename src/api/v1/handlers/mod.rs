pub mod health;
pub mod members;
pub mod ranks;
pub mod todos;
