//! Paris data bridge.
//!
//! Looks up RATP line destinations over HTTP and republishes each
//! result on a message bus topic, where a separate subscriber process
//! logs what arrives.

pub mod bus;
pub mod config;
pub mod domain;
pub mod ratp;
pub mod web;
