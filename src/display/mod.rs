// Display module - palette conversion, framebuffer and the window host

pub mod framebuffer;
pub mod palette;
pub mod screenshot;
pub mod window;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use screenshot::{save_screenshot, ScreenshotError};
pub use window::{run_window, WindowConfig};
