pub mod calculation;
pub mod form;
pub mod history;
pub mod settings;
pub mod summary;
pub mod trade;
