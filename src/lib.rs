//! Core modules for the study-scene renderer.
//!
//! The crate exposes the camera, lighting, scene-content and texture
//! building blocks separately from the windowed binary so that the state
//! machines stay testable without a GPU or a display.

pub mod camera;
pub mod input;
pub mod lighting;
pub mod render;
pub mod scene;
pub mod state;
pub mod texture;

pub use camera::{CameraMode, CameraRig, FirstPersonCamera, OrbitalCamera};
pub use input::{bound_action, Action, InputState, KeyCode, MouseButton, MoveDir, NamedKey};
pub use lighting::{LightParams, LightingState};
pub use render::{CameraParams, Renderer};
pub use scene::{build_scene, MeshBatch, SceneGeometry, Vertex, Visibility};
pub use state::{AnimationClock, SceneState};
pub use texture::{load_surface, load_surfaces, Surface, SurfaceImage, WrapMode};
