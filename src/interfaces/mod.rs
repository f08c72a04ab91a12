//! The display surface and the ways user input reaches the application.

pub mod csv;
pub mod form;
pub mod view;
