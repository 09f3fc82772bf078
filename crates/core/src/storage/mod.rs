pub mod backend;
pub mod history;
