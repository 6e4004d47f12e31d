//! Drag gesture state and handle disambiguation.
//!
//! The selection may be "crossed" (end handle left of the start handle)
//! after an earlier drag. In that state the handle is picked from the drag
//! direction relative to the start handle only, which is a lossy guess kept
//! so the strip stays usable until the user restores the order.

use serde::Serialize;

/// One boundary marker of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    Start,
    End,
}

/// State of one drag, alive between `drag_start` and `drag_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub active_handle: Handle,
    /// Direction guess made when the drag began on a crossed selection.
    pub crossover_left_drag: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Why a drag update left the selection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragRejection {
    NotDragging,
    /// The move would push a handle to or past the strip edge.
    OutOfRange,
}

/// Result of applying one drag update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Moved(Handle),
    Rejected(DragRejection),
}

/// Starts a drag at `local_x`, deciding which handle it controls.
///
/// Equidistant presses go to the end handle.
pub fn begin_drag(start_px: f64, end_px: f64, local_x: f64) -> DragSession {
    if end_px >= start_px {
        let active_handle = if (start_px - local_x).abs() < (end_px - local_x).abs() {
            Handle::Start
        } else {
            Handle::End
        };
        return DragSession {
            active_handle,
            crossover_left_drag: false,
        };
    }

    let crossover_left_drag = local_x < start_px;
    DragSession {
        active_handle: if crossover_left_drag {
            Handle::Start
        } else {
            Handle::End
        },
        crossover_left_drag,
    }
}

/// Picks the handle a `delta_x` update moves, or rejects the update.
///
/// Moves that would reach past zero or the strip end are dropped, not
/// clamped.
pub fn resolve_move(
    session: &DragSession,
    start_px: f64,
    end_px: f64,
    delta_x: f64,
    strip_width_px: f64,
) -> Result<Handle, DragRejection> {
    let (wants_start, wants_end) = if end_px >= start_px {
        (
            session.active_handle == Handle::Start,
            session.active_handle == Handle::End,
        )
    } else {
        (session.crossover_left_drag, !session.crossover_left_drag)
    };

    if wants_start && start_px + delta_x > 0.0 {
        Ok(Handle::Start)
    } else if wants_end && end_px + delta_x < strip_width_px {
        Ok(Handle::End)
    } else {
        Err(DragRejection::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::{DragRejection, DragSession, Handle, begin_drag, resolve_move};

    #[test]
    fn press_near_end_selects_end() {
        let session = begin_drag(0.0, 300.0, 250.0);
        assert_eq!(session.active_handle, Handle::End);
        assert!(!session.crossover_left_drag);
    }

    #[test]
    fn press_near_start_selects_start() {
        let session = begin_drag(0.0, 300.0, 40.0);
        assert_eq!(session.active_handle, Handle::Start);
    }

    #[test]
    fn equidistant_press_selects_end() {
        let session = begin_drag(100.0, 200.0, 150.0);
        assert_eq!(session.active_handle, Handle::End);
    }

    #[test]
    fn crossed_selection_picks_by_side_of_start_handle() {
        let left = begin_drag(200.0, 100.0, 150.0);
        assert_eq!(left.active_handle, Handle::Start);
        assert!(left.crossover_left_drag);

        let right = begin_drag(200.0, 100.0, 250.0);
        assert_eq!(right.active_handle, Handle::End);
        assert!(!right.crossover_left_drag);
    }

    #[test]
    fn start_move_to_zero_is_rejected() {
        let session = DragSession {
            active_handle: Handle::Start,
            crossover_left_drag: false,
        };
        assert_eq!(
            resolve_move(&session, 10.0, 300.0, -10.0, 300.0),
            Err(DragRejection::OutOfRange)
        );
        assert_eq!(
            resolve_move(&session, 10.0, 300.0, -9.0, 300.0),
            Ok(Handle::Start)
        );
    }

    #[test]
    fn end_move_to_strip_edge_is_rejected() {
        let session = DragSession {
            active_handle: Handle::End,
            crossover_left_drag: false,
        };
        assert_eq!(
            resolve_move(&session, 0.0, 290.0, 10.0, 300.0),
            Err(DragRejection::OutOfRange)
        );
        assert_eq!(
            resolve_move(&session, 0.0, 290.0, 9.5, 300.0),
            Ok(Handle::End)
        );
    }

    #[test]
    fn crossed_moves_follow_the_direction_flag() {
        let left = DragSession {
            active_handle: Handle::End,
            crossover_left_drag: true,
        };
        assert_eq!(
            resolve_move(&left, 200.0, 100.0, -5.0, 300.0),
            Ok(Handle::Start)
        );

        let right = DragSession {
            active_handle: Handle::Start,
            crossover_left_drag: false,
        };
        assert_eq!(
            resolve_move(&right, 200.0, 100.0, 5.0, 300.0),
            Ok(Handle::End)
        );
    }

    #[test]
    fn crossed_moves_keep_both_strip_guards() {
        let left = DragSession {
            active_handle: Handle::Start,
            crossover_left_drag: true,
        };
        assert_eq!(
            resolve_move(&left, 200.0, 100.0, -200.0, 300.0),
            Err(DragRejection::OutOfRange)
        );

        let right = DragSession {
            active_handle: Handle::End,
            crossover_left_drag: false,
        };
        assert_eq!(
            resolve_move(&right, 200.0, 100.0, 200.0, 300.0),
            Err(DragRejection::OutOfRange)
        );
    }
}
