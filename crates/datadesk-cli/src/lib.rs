//! Front end of the datadesk workbench: configuration loading and the
//! interactive command shell.
pub mod config;
pub mod shell;
