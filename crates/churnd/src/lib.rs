//! Churnd - customer churn prediction daemon
//!
//! Two thin front doors (REST endpoint, interactive form) over one shared
//! pipeline: validate the 18-field record, dispatch to the inference
//! collaborator, shape the verdict for the door it came through.

pub mod config;
pub mod dispatch;
pub mod form;
pub mod inference;
pub mod routes;
pub mod server;
