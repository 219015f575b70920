//! Two-page spread navigation
//!
//! Pages are shown as left/right pairs starting at an even index. A
//! navigation request starts a transition that the presentation layer ends
//! with [`SpreadNavigator::complete_transition`] once its page-turn animation
//! finishes. Requests that are not currently valid are ignored rather than
//! reported, so rapid input during a page turn cannot desynchronise state.

use serde::{Deserialize, Serialize};

/// Direction of a page turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// An in-flight page turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    pub target_left: usize,
    pub direction: Direction,
}

/// Navigation state: the visible spread and an optional page turn
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigatorState {
    pub current_left: usize,
    pub transition: Option<Transition>,
}

impl NavigatorState {
    /// State of a freshly opened book
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.transition.is_none()
    }

    /// Start turning to the next spread, if idle and one exists
    pub fn request_next(self, total_pages: usize) -> Self {
        if !self.is_idle() || self.current_left + 4 > total_pages {
            return self;
        }
        Self {
            transition: Some(Transition {
                target_left: self.current_left + 2,
                direction: Direction::Forward,
            }),
            ..self
        }
    }

    /// Start turning to the previous spread, if idle and one exists
    pub fn request_prev(self) -> Self {
        if !self.is_idle() || self.current_left < 2 {
            return self;
        }
        Self {
            transition: Some(Transition {
                target_left: self.current_left - 2,
                direction: Direction::Backward,
            }),
            ..self
        }
    }

    /// Land on the target spread of the running transition
    pub fn complete_transition(self) -> Self {
        match self.transition {
            Some(transition) => Self {
                current_left: transition.target_left,
                transition: None,
            },
            None => self,
        }
    }
}

/// Page indices for each rendering role of the current state.
///
/// While a transition runs, the static spread already shows the pages that
/// the turning page will uncover, and the turning page carries the two
/// faces being flipped.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SpreadRoles {
    pub static_left: usize,
    pub static_right: usize,
    pub turning: Option<TurningPage>,
}

/// The two faces of the page being turned
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TurningPage {
    pub direction: Direction,
    pub front: usize,
    pub back: usize,
}

/// Navigator over a fixed number of pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadNavigator {
    total_pages: usize,
    state: NavigatorState,
}

impl SpreadNavigator {
    /// Open at the first spread
    pub fn open(total_pages: usize) -> Self {
        Self {
            total_pages,
            state: NavigatorState::initial(),
        }
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_left(&self) -> usize {
        self.state.current_left
    }

    pub fn is_transitioning(&self) -> bool {
        !self.state.is_idle()
    }

    /// Returns whether a transition was started
    pub fn request_next(&mut self) -> bool {
        let before = self.state;
        self.state = before.request_next(self.total_pages);
        self.log_change(before, "next")
    }

    /// Returns whether a transition was started
    pub fn request_prev(&mut self) -> bool {
        let before = self.state;
        self.state = before.request_prev();
        self.log_change(before, "prev")
    }

    /// Returns whether a transition was completed
    pub fn complete_transition(&mut self) -> bool {
        let before = self.state;
        self.state = before.complete_transition();
        self.log_change(before, "complete")
    }

    fn log_change(&self, before: NavigatorState, request: &str) -> bool {
        let changed = before != self.state;
        if changed {
            tracing::debug!(request, from = ?before, to = ?self.state, "navigator state changed");
        } else {
            tracing::trace!(request, state = ?self.state, "navigation request ignored");
        }
        changed
    }

    /// Left page of the static spread
    pub fn static_left(&self) -> usize {
        match self.state.transition {
            Some(Transition {
                target_left,
                direction: Direction::Backward,
            }) => target_left,
            _ => self.state.current_left,
        }
    }

    /// Right page of the static spread
    pub fn static_right(&self) -> usize {
        match self.state.transition {
            Some(Transition {
                target_left,
                direction: Direction::Forward,
            }) => target_left + 1,
            _ => self.state.current_left + 1,
        }
    }

    /// Front face of the turning page
    pub fn turning_front(&self) -> Option<usize> {
        let left = self.state.current_left;
        self.state.transition.map(|t| match t.direction {
            Direction::Forward => left + 1,
            Direction::Backward => left,
        })
    }

    /// Back face of the turning page
    pub fn turning_back(&self) -> Option<usize> {
        let left = self.state.current_left;
        self.state.transition.map(|t| match t.direction {
            Direction::Forward => left + 2,
            Direction::Backward => left.saturating_sub(1),
        })
    }

    pub fn roles(&self) -> SpreadRoles {
        let turning = match (
            self.state.transition,
            self.turning_front(),
            self.turning_back(),
        ) {
            (Some(t), Some(front), Some(back)) => Some(TurningPage {
                direction: t.direction,
                front,
                back,
            }),
            _ => None,
        };
        SpreadRoles {
            static_left: self.static_left(),
            static_right: self.static_right(),
            turning,
        }
    }

    /// Fraction of the book shown so far, counting the visible spread
    pub fn progress(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        let shown = (self.state.current_left + 2).min(self.total_pages);
        shown as f64 / self.total_pages as f64
    }

    /// Footer label such as `Pages 3-4 of 10`
    pub fn page_label(&self) -> String {
        let left = self.state.current_left;
        if left + 1 < self.total_pages {
            format!("Pages {}-{} of {}", left + 1, left + 2, self.total_pages)
        } else {
            format!("Page {} of {}", left + 1, self.total_pages)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_six_pages() {
        let mut nav = SpreadNavigator::open(6);
        assert_eq!(nav.state(), NavigatorState::initial());

        assert!(nav.request_next());
        assert_eq!(
            nav.state().transition,
            Some(Transition {
                target_left: 2,
                direction: Direction::Forward
            })
        );
        assert!(nav.complete_transition());
        assert_eq!(nav.current_left(), 2);

        assert!(nav.request_next());
        assert!(nav.complete_transition());
        assert_eq!(nav.current_left(), 4);

        let before = nav.state();
        assert!(!nav.request_next());
        assert_eq!(nav.state(), before);
    }

    #[test]
    fn test_prev_at_start_is_ignored() {
        let mut nav = SpreadNavigator::open(4);
        assert!(!nav.request_prev());
        assert_eq!(nav.state(), NavigatorState::initial());
    }

    #[test]
    fn test_requests_during_transition_are_ignored() {
        let mut nav = SpreadNavigator::open(8);
        assert!(nav.request_next());
        let turning = nav.state();

        assert!(!nav.request_next());
        assert!(!nav.request_prev());
        assert_eq!(nav.state(), turning);

        assert!(nav.complete_transition());
        assert!(!nav.complete_transition());
        assert_eq!(nav.current_left(), 2);
    }

    #[test]
    fn test_two_page_book_cannot_move() {
        let mut nav = SpreadNavigator::open(2);
        assert!(!nav.request_next());
        assert!(!nav.request_prev());
        assert_eq!(nav.page_label(), "Pages 1-2 of 2");
        assert_eq!(nav.progress(), 1.0);
    }

    #[test]
    fn test_forward_roles() {
        let mut nav = SpreadNavigator::open(6);
        nav.request_next();
        assert_eq!(
            nav.roles(),
            SpreadRoles {
                static_left: 0,
                static_right: 3,
                turning: Some(TurningPage {
                    direction: Direction::Forward,
                    front: 1,
                    back: 2,
                }),
            }
        );
    }

    #[test]
    fn test_backward_roles() {
        let mut nav = SpreadNavigator::open(6);
        nav.request_next();
        nav.complete_transition();
        nav.request_prev();
        assert_eq!(
            nav.roles(),
            SpreadRoles {
                static_left: 0,
                static_right: 3,
                turning: Some(TurningPage {
                    direction: Direction::Backward,
                    front: 2,
                    back: 1,
                }),
            }
        );
    }

    #[test]
    fn test_idle_roles() {
        let nav = SpreadNavigator::open(6);
        assert_eq!(nav.static_left(), 0);
        assert_eq!(nav.static_right(), 1);
        assert_eq!(nav.turning_front(), None);
        assert_eq!(nav.turning_back(), None);
    }

    #[test]
    fn test_progress_and_label() {
        let mut nav = SpreadNavigator::open(10);
        assert_eq!(nav.page_label(), "Pages 1-2 of 10");
        assert!((nav.progress() - 0.2).abs() < f64::EPSILON);

        nav.request_next();
        nav.complete_transition();
        assert_eq!(nav.page_label(), "Pages 3-4 of 10");
        assert!((nav.progress() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pure_state_transitions() {
        let state = NavigatorState::initial().request_next(4);
        assert!(!state.is_idle());
        assert_eq!(state.request_next(4), state);
        assert_eq!(state.request_prev(), state);

        let landed = state.complete_transition();
        assert_eq!(landed.current_left, 2);
        assert!(landed.is_idle());
        assert_eq!(landed.request_next(4), landed);
    }
}
