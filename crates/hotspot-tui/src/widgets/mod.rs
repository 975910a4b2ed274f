//! Reusable rendering helpers shared across panels.

pub mod dialog;
pub mod form;
pub mod header;
pub mod meter;
pub mod sub_tabs;
