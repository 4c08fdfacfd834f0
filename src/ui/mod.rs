//! UI module - reusable rendering helpers shared by the dialog and host window

pub mod components;
