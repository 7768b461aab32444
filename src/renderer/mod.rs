//! Rendering, window and input surface
//!
//! The game core never talks to a concrete backend. It is handed a
//! [`Surface`] each frame and only uses the operations below.

pub mod headless;
pub mod shapes;

pub use headless::{HeadlessSurface, ScriptedFrame};
pub use shapes::{Color, Drawable};

/// Keys the game loop queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Quit
    Escape,
    /// Toggle pause
    P,
    /// Reset the board
    R,
    /// Paddle left
    Left,
    /// Paddle right
    Right,
}

/// Events drained from the backend at the start of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Window close requested by the user
    Closed,
    /// Focus changes, resizes and anything else the loop ignores
    Other,
}

/// A window-like target the game loop draws into and reads input from
pub trait Surface {
    /// Whether the window is still open
    fn is_open(&self) -> bool;

    /// Request the window to close
    fn close(&mut self);

    /// Next pending backend event, if any
    fn poll_event(&mut self) -> Option<WindowEvent>;

    /// Whether `key` is currently held
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Clear the frame buffer
    fn clear(&mut self, color: Color);

    /// Queue a primitive for this frame
    fn draw(&mut self, drawable: &Drawable);

    /// Present the frame (and pace to the frame-rate cap)
    fn display(&mut self);

    /// Cap presentation to `fps` frames per second; 0 disables the cap
    fn set_framerate_limit(&mut self, fps: u32);
}
