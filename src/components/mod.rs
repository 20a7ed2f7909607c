pub mod form;
pub mod ui;
