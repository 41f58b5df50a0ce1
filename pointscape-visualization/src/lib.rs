//! Interactive visualization pipeline
//!
//! This crate turns a loaded point set into frames a renderer can draw:
//! - Session state machine and command dispatch
//! - Render projection of points to primitives
//! - Camera controller adapter and an orbit camera
//! - Data sources for the initial point set

pub mod camera;
pub mod command;
pub mod config;
pub mod controller;
pub mod host;
pub mod primitive;
pub mod session;
pub mod source;
pub mod viewer;

pub use camera::*;
pub use command::*;
pub use config::*;
pub use controller::*;
pub use host::*;
pub use primitive::*;
pub use session::*;
pub use source::*;
pub use viewer::*;
