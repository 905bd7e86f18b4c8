//! Button component modules
//!
//! Each module contains the component definition and ButtonWithLabel implementation
//! for a specific control button type.

#[cfg(not(target_arch = "wasm32"))]
pub mod quit;
pub mod reset;
pub mod start;
pub mod stop;

#[cfg(not(target_arch = "wasm32"))]
pub use quit::QuitButton;
pub use reset::ResetButton;
pub use start::StartButton;
pub use stop::StopButton;
