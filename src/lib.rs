#![allow(clippy::many_single_char_names)]

pub mod config;
pub mod frame;
pub mod grid;
pub mod lighting;
pub mod material;
pub mod math;
pub mod object;
pub mod render;
pub mod scene;

pub use frame::{CellKind, FrameBuffer};
pub use scene::{compute_frame, LightingEngine, SceneState};
