//! Application module: exposes the controller used by the UI and runtime.
//!
//! The `App` model lives in `app::model` and holds the library, transport
//! and lyrics editor state.

mod model;

pub use model::*;
