//! Touch gesture recognition for the board and the unit pool. Browsers fire
//! no native drag events for touch, so a hold-then-move synthetic drag is
//! recognized here as a pure state machine; the components feed it raw
//! touch coordinates and a hold timer, and consume the abstract outcomes.

use crate::model::Position;

/// Hold time before a press on a board token becomes a drag.
pub const HOLD_DELAY_BOARD_MS: u32 = 250;
/// Hold time before a press on a pool card becomes a drag.
pub const HOLD_DELAY_POOL_MS: u32 = 280;
/// Finger travel beyond this is a scroll, not a press.
pub const MOVE_TOLERANCE_PX: f64 = 10.0;

/// What a drag carries: a pool card's unit id, or a board cell of origin.
#[derive(Clone, Debug, PartialEq)]
pub enum DragSource {
    Pool { unit_id: String, img: String },
    Cell { from: Position, img: String },
}

impl DragSource {
    pub fn hold_delay_ms(&self) -> u32 {
        match self {
            DragSource::Pool { .. } => HOLD_DELAY_POOL_MS,
            DragSource::Cell { .. } => HOLD_DELAY_BOARD_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Pending {
    source: DragSource,
    start_x: f64,
    start_y: f64,
    token: u32,
}

/// Result of a finger movement.
#[derive(Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Nothing tracked, or small jitter under the tolerance.
    Ignored,
    /// Movement exceeded the tolerance before the hold elapsed; the press
    /// is abandoned to the scroll.
    Scrolled,
    /// A synthetic drag is in flight; the ghost follows the finger.
    Dragging { x: f64, y: f64 },
}

/// Result of lifting the finger.
#[derive(Clone, Debug, PartialEq)]
pub enum ReleaseOutcome {
    None,
    /// Press and release under the hold threshold without movement.
    Tap(DragSource),
    /// An active drag ended; the caller resolves the cell under the finger.
    Drop(DragSource),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchGesture {
    pending: Option<Pending>,
    dragging: Option<DragSource>,
    next_token: u32,
}

impl TouchGesture {
    /// Registers a finger press. Returns the token the hold timer must echo
    /// back; a stale token (from a superseded press) is ignored.
    pub fn press(&mut self, source: DragSource, x: f64, y: f64) -> u32 {
        self.next_token = self.next_token.wrapping_add(1);
        self.dragging = None;
        self.pending = Some(Pending {
            source,
            start_x: x,
            start_y: y,
            token: self.next_token,
        });
        self.next_token
    }

    /// Called when the hold timer fires. Promotes the press to a drag unless
    /// the press was already released, scrolled away, or superseded.
    pub fn hold_elapsed(&mut self, token: u32) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.token == token) {
            if let Some(p) = self.pending.take() {
                self.dragging = Some(p.source);
                return true;
            }
        }
        false
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn moved(&mut self, x: f64, y: f64) -> MoveOutcome {
        if self.dragging.is_some() {
            return MoveOutcome::Dragging { x, y };
        }
        let Some(p) = &self.pending else {
            return MoveOutcome::Ignored;
        };
        if (x - p.start_x).abs() > MOVE_TOLERANCE_PX || (y - p.start_y).abs() > MOVE_TOLERANCE_PX {
            self.pending = None;
            return MoveOutcome::Scrolled;
        }
        MoveOutcome::Ignored
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        if let Some(source) = self.dragging.take() {
            self.pending = None;
            return ReleaseOutcome::Drop(source);
        }
        match self.pending.take() {
            Some(p) => ReleaseOutcome::Tap(p.source),
            None => ReleaseOutcome::None,
        }
    }

    /// `touchcancel`: drop everything without emitting an outcome.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.dragging = None;
    }
}
