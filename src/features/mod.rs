pub mod app;
pub mod counter;
pub mod jokes;
