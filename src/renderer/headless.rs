//! Headless backend
//!
//! Plays back a per-frame script of held keys and backend events, and records
//! every draw call. The native binary uses it for unattended demo runs and the
//! test suite uses it in place of a real window.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::{Color, Drawable, Key, Surface, WindowEvent};

/// Input for a single frame of a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedFrame {
    /// Keys held down during this frame
    pub keys: Vec<Key>,
    /// Events delivered at the start of this frame
    pub events: Vec<WindowEvent>,
}

impl ScriptedFrame {
    /// A frame with no input
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame with `keys` held
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            keys: keys.to_vec(),
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: WindowEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Scripted, draw-recording [`Surface`]
#[derive(Debug)]
pub struct HeadlessSurface {
    script: VecDeque<ScriptedFrame>,
    current: ScriptedFrame,
    pending_events: VecDeque<WindowEvent>,
    open: bool,
    clear_color: Option<Color>,
    frame_draws: Vec<Drawable>,
    last_frame: Vec<Drawable>,
    frames_presented: usize,
    total_draw_calls: usize,
    frame_rate_limit: u32,
    pace: bool,
    last_present: Option<Instant>,
}

impl HeadlessSurface {
    /// Create a surface that stays open for exactly `script.len()` presented frames
    pub fn new(script: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        let mut surface = Self {
            script: script.into_iter().collect(),
            current: ScriptedFrame::idle(),
            pending_events: VecDeque::new(),
            open: true,
            clear_color: None,
            frame_draws: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
            total_draw_calls: 0,
            frame_rate_limit: 0,
            pace: false,
            last_present: None,
        };
        surface.advance();
        surface
    }

    /// `frames` frames without any input
    pub fn idle(frames: usize) -> Self {
        Self::new(std::iter::repeat_n(ScriptedFrame::idle(), frames))
    }

    /// Sleep in [`Surface::display`] to honor the frame-rate cap
    pub fn with_pacing(mut self, pace: bool) -> Self {
        self.pace = pace;
        self
    }

    /// Draw calls queued since the last clear/display
    pub fn pending_draws(&self) -> &[Drawable] {
        &self.frame_draws
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[Drawable] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn total_draw_calls(&self) -> usize {
        self.total_draw_calls
    }

    pub fn frame_rate_limit(&self) -> u32 {
        self.frame_rate_limit
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    /// Move to the next scripted frame, closing once the script runs out
    fn advance(&mut self) {
        match self.script.pop_front() {
            Some(frame) => {
                self.pending_events.extend(frame.events.iter().copied());
                self.current = frame;
            }
            None => {
                self.current = ScriptedFrame::idle();
                self.open = false;
            }
        }
    }

    fn pace_frame(&mut self) {
        if self.pace && self.frame_rate_limit > 0 {
            let budget = Duration::from_secs_f64(1.0 / self.frame_rate_limit as f64);
            if let Some(last) = self.last_present {
                let elapsed = last.elapsed();
                if elapsed < budget {
                    std::thread::sleep(budget - elapsed);
                }
            }
        }
        self.last_present = Some(Instant::now());
    }
}

impl Surface for HeadlessSurface {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        self.pending_events.pop_front()
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.current.keys.contains(&key)
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = Some(color);
        self.frame_draws.clear();
    }

    fn draw(&mut self, drawable: &Drawable) {
        self.frame_draws.push(*drawable);
        self.total_draw_calls += 1;
    }

    fn display(&mut self) {
        self.pace_frame();
        self.last_frame = std::mem::take(&mut self.frame_draws);
        self.frames_presented += 1;
        self.advance();
    }

    fn set_framerate_limit(&mut self, fps: u32) {
        self.frame_rate_limit = fps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_script_drives_keys_and_closes() {
        let mut surface = HeadlessSurface::new([
            ScriptedFrame::holding(&[Key::P]),
            ScriptedFrame::idle(),
        ]);
        assert!(surface.is_open());
        assert!(surface.is_key_pressed(Key::P));

        surface.display();
        assert!(surface.is_open());
        assert!(!surface.is_key_pressed(Key::P));

        surface.display();
        assert!(!surface.is_open());
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn test_events_delivered_once() {
        let mut surface = HeadlessSurface::new([ScriptedFrame::idle().with_event(WindowEvent::Closed)]);
        assert_eq!(surface.poll_event(), Some(WindowEvent::Closed));
        assert_eq!(surface.poll_event(), None);
    }

    #[test]
    fn test_draws_recorded_per_frame() {
        let mut surface = HeadlessSurface::idle(2);
        surface.clear(Color::BLACK);
        surface.draw(&Drawable::circle(Vec2::ZERO, 1.0, Color::WHITE));
        assert_eq!(surface.pending_draws().len(), 1);
        surface.display();
        assert_eq!(surface.last_frame().len(), 1);
        assert!(surface.pending_draws().is_empty());
        assert_eq!(surface.total_draw_calls(), 1);
    }

    #[test]
    fn test_empty_script_starts_closed() {
        let surface = HeadlessSurface::idle(0);
        assert!(!surface.is_open());
    }
}
