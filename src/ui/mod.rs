/// UI module exports
mod status;

pub mod auth_callback;
pub mod popup;
