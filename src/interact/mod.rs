//! Pointer interaction state machine.
//!
//! Explicit state plus pure transition functions: `(state, event, pick) ->
//! (state, effects)`. The caller owns the camera and the panel store and
//! applies the returned effects; nothing here touches renderer state
//! directly, which keeps every transition unit-testable with a canned pick
//! function.
//!
//! A pointer press starts a *pending* drag. Movement past a small pixel
//! threshold promotes it to a real drag, which orbits the camera and
//! permanently disables auto-rotation for the session. A release that never
//! passed the threshold is a click and re-picks for selection. Hover picking
//! runs on movement while no drag is in progress.

#![allow(dead_code)]

/// Movement in pixels before a press is treated as a drag, not a click.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;
/// Orbit speed, radians per pixel of pointer travel.
pub const ORBIT_SPEED: f32 = 0.008;
/// Camera distance change per wheel line.
pub const ZOOM_STEP: f32 = 0.6;

/// Pointer input in framebuffer pixel coordinates, origin top-left.
/// Single-pointer only; touch drags arrive as the same event stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Wheel { delta: f32 },
    /// Pointer left the viewport.
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    start: (f32, f32),
    last: (f32, f32),
}

/// Ephemeral per-session interaction state. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    press: Option<Press>,
    dragging: bool,
    /// True until the user's first drag, then false for the session.
    pub auto_rotate: bool,
    hovered: Option<String>,
    selected: Option<String>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            press: None,
            dragging: false,
            auto_rotate: true,
            hovered: None,
            selected: None,
        }
    }
}

impl InteractionState {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Drop hover/selection that refer to panels which no longer exist
    /// (vehicle category change).
    pub fn retain_panels(&mut self, exists: impl Fn(&str) -> bool) {
        if self.hovered.as_deref().is_some_and(|id| !exists(id)) {
            self.hovered = None;
        }
        if self.selected.as_deref().is_some_and(|id| !exists(id)) {
            self.selected = None;
        }
    }
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Orbit the camera by the given yaw/pitch deltas (radians).
    Orbit { yaw: f32, pitch: f32 },
    /// Zoom the camera by the given distance delta.
    Zoom { delta: f32 },
    /// Hover moved; both panels need their shading recomputed.
    HoverChanged {
        previous: Option<String>,
        current: Option<String>,
    },
    /// Selection replaced; both panels need their shading recomputed.
    SelectionChanged {
        previous: Option<String>,
        current: Option<String>,
    },
}

/// Advance the state machine by one pointer event. `pick` resolves a
/// viewport position to the nearest panel id and is only invoked when the
/// event requires a ray cast.
pub fn transition(
    state: &InteractionState,
    event: &PointerEvent,
    pick: impl Fn(f32, f32) -> Option<String>,
) -> (InteractionState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match *event {
        PointerEvent::Down { x, y } => {
            next.press = Some(Press {
                start: (x, y),
                last: (x, y),
            });
            next.dragging = false;
        }
        PointerEvent::Move { x, y } => match next.press {
            Some(ref mut press) => {
                let dx = x - press.last.0;
                let dy = y - press.last.1;
                press.last = (x, y);
                if !next.dragging {
                    let travel_x = x - press.start.0;
                    let travel_y = y - press.start.1;
                    if (travel_x * travel_x + travel_y * travel_y).sqrt() > DRAG_THRESHOLD_PX {
                        next.dragging = true;
                        next.auto_rotate = false;
                    }
                }
                if next.dragging {
                    effects.push(Effect::Orbit {
                        yaw: dx * ORBIT_SPEED,
                        pitch: dy * ORBIT_SPEED,
                    });
                } else {
                    update_hover(&mut next, &mut effects, pick(x, y));
                }
            }
            None => update_hover(&mut next, &mut effects, pick(x, y)),
        },
        PointerEvent::Up { x, y } => {
            let was_click = next.press.is_some() && !next.dragging;
            next.press = None;
            next.dragging = false;
            if was_click {
                // A second ray cast at the release position decides the new
                // selection; clicking empty space clears it.
                let current = pick(x, y);
                if current != next.selected {
                    let previous = next.selected.take();
                    next.selected = current.clone();
                    effects.push(Effect::SelectionChanged { previous, current });
                }
            }
        }
        PointerEvent::Wheel { delta } => {
            effects.push(Effect::Zoom {
                delta: -delta * ZOOM_STEP,
            });
        }
        PointerEvent::Left => {
            next.press = None;
            next.dragging = false;
            update_hover(&mut next, &mut effects, None);
        }
    }

    (next, effects)
}

fn update_hover(state: &mut InteractionState, effects: &mut Vec<Effect>, current: Option<String>) {
    if current != state.hovered {
        let previous = state.hovered.take();
        state.hovered = current.clone();
        effects.push(Effect::HoverChanged { previous, current });
    }
}
