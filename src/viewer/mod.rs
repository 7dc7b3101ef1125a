// SPDX-License-Identifier: MPL-2.0
//! Interactive viewer: gestures, events, settings and the engine that ties
//! them to the frame cache.

pub mod engine;
pub mod events;
pub mod gesture;
pub mod settings;

pub use engine::{EngineState, ViewerEngine};
pub use events::{EventBus, ViewerEvent};
pub use gesture::GestureTracker;
pub use settings::{request_timeout, InputKind, ViewerSettings};
