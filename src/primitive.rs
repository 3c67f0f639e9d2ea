//! Placeholder primitive - pulsing shape renderer with shared clocks.
//!
//! A placeholder pulses its background between a base and a highlight color
//! over a fixed 1.5 second cycle with ease-in-out interpolation, looping for
//! as long as it is mounted. All placeholders on the same period share one
//! timer for efficiency and visual sync.
//!
//! # Pattern
//!
//! - Every shape pulsing on the same period shares a single timer
//! - Timer starts with the first subscriber, stops when the last unsubscribes
//! - The clock exposes a phase in [0, 1): position inside the current cycle
//!
//! # Example
//!
//! ```ignore
//! use skeleton_tui::primitive::{subscribe_to_pulse, pulse_factor, PULSE_PERIOD_MS};
//!
//! // Subscribe while loading
//! let unsubscribe = subscribe_to_pulse(PULSE_PERIOD_MS);
//!
//! // Each frame: sample the eased blend factor
//! let t = pulse_factor(PULSE_PERIOD_MS);
//!
//! // Cleanup when loading ends
//! unsubscribe();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use spark_signals::{signal, Signal};

use crate::render::FrameBuffer;
use crate::types::{Cleanup, Rect, Rgba};

/// Full pulse cycle: base -> highlight -> base.
pub const PULSE_PERIOD_MS: u64 = 1500;

/// Clock granularity. ~30 updates per second reads as smooth in a terminal.
const TICK_MS: u64 = 33;

// =============================================================================
// PULSE REGISTRY
// =============================================================================

/// Per-period pulse registry containing shared timer state.
struct PulseRegistry {
    /// Phase signal (local, synced from the thread-safe atomic on read).
    phase: Signal<f32>,
    /// Position inside the cycle in ms, written by the timer thread.
    position_atomic: Arc<AtomicU32>,
    /// Background timer thread handle.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal the timer thread to stop.
    running: Arc<AtomicBool>,
    /// Number of active subscribers.
    subscribers: usize,
}

thread_local! {
    /// Map from period (ms) to pulse registry.
    static PULSE_REGISTRIES: RefCell<HashMap<u64, PulseRegistry>> = RefCell::new(HashMap::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to the pulse clock for the given period.
///
/// Returns an unsubscribe function that must be called when done.
/// Multiple subscribers on the same period share one timer.
///
/// A period of 0 returns a no-op unsubscribe (pulsing disabled; the
/// placeholder holds its base color).
pub fn subscribe_to_pulse(period_ms: u64) -> Cleanup {
    if period_ms == 0 {
        return Box::new(|| {});
    }

    PULSE_REGISTRIES.with(|registries| {
        let mut registries = registries.borrow_mut();

        let registry = registries.entry(period_ms).or_insert_with(|| PulseRegistry {
            phase: signal(0.0f32),
            position_atomic: Arc::new(AtomicU32::new(0)),
            handle: None,
            running: Arc::new(AtomicBool::new(false)),
            subscribers: 0,
        });

        registry.subscribers += 1;

        // Start timer if first subscriber
        if registry.subscribers == 1 {
            let position = registry.position_atomic.clone();
            let running = registry.running.clone();
            running.store(true, Ordering::SeqCst);

            registry.handle = Some(thread::spawn(move || {
                while running.load(Ordering::SeqCst) {
                    thread::sleep(Duration::from_millis(TICK_MS));
                    if running.load(Ordering::SeqCst) {
                        let next =
                            (position.load(Ordering::SeqCst) as u64 + TICK_MS) % period_ms;
                        position.store(next as u32, Ordering::SeqCst);
                    }
                }
            }));
        }
    });

    // Return unsubscribe closure
    Box::new(move || {
        PULSE_REGISTRIES.with(|registries| {
            let mut registries = registries.borrow_mut();
            if let Some(registry) = registries.get_mut(&period_ms) {
                registry.subscribers = registry.subscribers.saturating_sub(1);

                // Stop timer if no more subscribers
                if registry.subscribers == 0 {
                    registry.running.store(false, Ordering::SeqCst);
                    registry.position_atomic.store(0, Ordering::SeqCst);
                    registry.phase.set(0.0);

                    // Thread exits on its next tick; not joined here to
                    // avoid blocking the caller
                }
            }
        });
    })
}

/// Current phase in [0, 1) for the given period: position inside the cycle.
///
/// Returns 0.0 (base color) if no clock is running for this period.
/// Also syncs the atomic position into the phase signal for reactive reads.
pub fn get_pulse_phase(period_ms: u64) -> f32 {
    if period_ms == 0 {
        return 0.0;
    }
    PULSE_REGISTRIES.with(|registries| {
        let mut registries = registries.borrow_mut();
        if let Some(registry) = registries.get_mut(&period_ms) {
            let position = registry.position_atomic.load(Ordering::SeqCst);
            let phase = position as f32 / period_ms as f32;
            if registry.phase.get() != phase {
                registry.phase.set(phase);
            }
            phase
        } else {
            0.0
        }
    })
}

/// Eased blend factor in [0, 1] for the given period.
///
/// The cycle is a triangle wave (base at the ends, highlight at the middle)
/// smoothed with ease-in-out, so the cross-fade breathes instead of ticking.
pub fn pulse_factor(period_ms: u64) -> f32 {
    eased_factor(get_pulse_phase(period_ms))
}

/// Map a cycle phase in [0, 1) to an eased blend factor in [0, 1].
#[inline]
pub fn eased_factor(phase: f32) -> f32 {
    let triangle = 1.0 - (2.0 * phase - 1.0).abs();
    smoothstep(triangle)
}

/// Ease-in-out (smoothstep) over [0, 1].
#[inline]
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Current pulse color between base and highlight for a blend factor.
#[inline]
pub fn pulse_color(color: Rgba, highlight: Rgba, factor: f32) -> Rgba {
    Rgba::lerp(color, highlight, factor)
}

/// Paint one placeholder box at its current pulse frame.
///
/// A pure rendering leaf: fill the rect with the interpolated color,
/// softening the corners when the radius is nonzero. Inputs pass through
/// unvalidated; the buffer clips out-of-bounds cells.
pub fn draw_placeholder(
    fb: &mut FrameBuffer,
    rect: Rect,
    radius_cells: u16,
    color: Rgba,
    highlight: Rgba,
) {
    let fill = pulse_color(color, highlight, pulse_factor(PULSE_PERIOD_MS));
    fb.fill_rounded_rect(rect, radius_cells, fill);
}

/// Check if a pulse clock is currently running for the given period.
pub fn is_pulse_running(period_ms: u64) -> bool {
    PULSE_REGISTRIES.with(|registries| {
        let registries = registries.borrow();
        registries
            .get(&period_ms)
            .map(|r| r.running.load(Ordering::SeqCst) && r.subscribers > 0)
            .unwrap_or(false)
    })
}

/// Get the number of subscribers for a given period.
pub fn get_subscriber_count(period_ms: u64) -> usize {
    PULSE_REGISTRIES.with(|registries| {
        let registries = registries.borrow();
        registries.get(&period_ms).map(|r| r.subscribers).unwrap_or(0)
    })
}

/// Reset all pulse registries (for testing).
///
/// Stops all timers and clears all registries.
pub fn reset_pulse_registries() {
    PULSE_REGISTRIES.with(|registries| {
        let mut registries = registries.borrow_mut();

        for registry in registries.values_mut() {
            registry.running.store(false, Ordering::SeqCst);
            registry.subscribers = 0;
            registry.position_atomic.store(0, Ordering::SeqCst);
            registry.phase.set(0.0);
        }

        registries.clear();
    });
}

// =============================================================================
// TESTS
// =============================================================================
