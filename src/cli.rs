pub mod grocery;
pub mod send;
