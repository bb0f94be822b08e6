pub mod check;
pub mod models;
pub mod show;
pub mod tabulate;
