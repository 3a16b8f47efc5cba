//! Raw key-state flags shared between hosts and the progression worker.
use std::sync::atomic::{AtomicBool, Ordering};

use game_core::InputState;

/// Last-write-wins key flags. Hosts set them from any thread; the worker
/// samples them once per simulated tick.
#[derive(Debug, Default)]
pub struct InputFlags {
    left: AtomicBool,
    right: AtomicBool,
    up: AtomicBool,
    space: AtomicBool,
}

impl InputFlags {
    pub fn set_left(&self, pressed: bool) {
        self.left.store(pressed, Ordering::Relaxed);
    }

    pub fn set_right(&self, pressed: bool) {
        self.right.store(pressed, Ordering::Relaxed);
    }

    pub fn set_up(&self, pressed: bool) {
        self.up.store(pressed, Ordering::Relaxed);
    }

    pub fn set_space(&self, pressed: bool) {
        self.space.store(pressed, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> InputState {
        InputState {
            left: self.left.load(Ordering::Relaxed),
            right: self.right.load(Ordering::Relaxed),
            up: self.up.load(Ordering::Relaxed),
            space: self.space.load(Ordering::Relaxed),
        }
    }
}
