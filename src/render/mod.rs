//! Frame drawing against an injected immediate-mode surface

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;
pub mod overlay;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use frame::FrameRenderer;
pub use overlay::OverlayTransition;
pub use surface::{DrawSurface, Fill, GlowFill, Stroke};
