//! Pull status machine.
//!
//! ```text
//! NORMAL -> LOOSEN_REFRESH -> REFRESHING -> NORMAL   (down-pull)
//! NORMAL -> LOOSEN_LOAD    -> LOADING    -> NORMAL   (up-pull)
//! ```

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PullDirection {
    /// Content dragged downwards from its top edge; reveals the header.
    Down,
    /// Content dragged upwards from its bottom edge; reveals the footer.
    Up,
}

impl PullDirection {
    /// Projects a signed vertical value onto this direction. Positive means
    /// "further into the pull".
    pub fn magnitude(self, value: f32) -> f32 {
        match self {
            PullDirection::Down => value,
            PullDirection::Up => -value,
        }
    }

    /// Inverse of [`PullDirection::magnitude`].
    pub fn signed(self, magnitude: f32) -> f32 {
        match self {
            PullDirection::Down => magnitude,
            PullDirection::Up => -magnitude,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PullStatus {
    #[default]
    Normal,
    LoosenRefresh,
    LoosenLoad,
    Refreshing,
    Loading,
}

impl PullStatus {
    pub fn loosened(direction: PullDirection) -> Self {
        match direction {
            PullDirection::Down => PullStatus::LoosenRefresh,
            PullDirection::Up => PullStatus::LoosenLoad,
        }
    }

    pub fn active(direction: PullDirection) -> Self {
        match direction {
            PullDirection::Down => PullStatus::Refreshing,
            PullDirection::Up => PullStatus::Loading,
        }
    }

    pub fn is_loosened(self) -> bool {
        matches!(self, PullStatus::LoosenRefresh | PullStatus::LoosenLoad)
    }

    /// Refreshing or loading: the host owns the lifecycle until it calls stop.
    pub fn is_busy(self) -> bool {
        matches!(self, PullStatus::Refreshing | PullStatus::Loading)
    }
}

/// What a pointer release commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReleaseAction {
    Commit(PullDirection),
    ReturnToStart,
}

/// Status change caused by a drag frame, if any.
///
/// `displacement` is the raw pointer travel before damping.
pub(crate) fn on_drag(
    status: PullStatus,
    direction: PullDirection,
    displacement: f32,
    trigger_distance: f32,
) -> Option<PullStatus> {
    let past_trigger = direction.magnitude(displacement) > trigger_distance;
    let loosened = PullStatus::loosened(direction);
    match status {
        PullStatus::Normal if past_trigger => Some(loosened),
        current if current == loosened && !past_trigger => Some(PullStatus::Normal),
        _ => None,
    }
}

pub(crate) fn on_release(status: PullStatus) -> ReleaseAction {
    match status {
        PullStatus::LoosenRefresh => ReleaseAction::Commit(PullDirection::Down),
        PullStatus::LoosenLoad => ReleaseAction::Commit(PullDirection::Up),
        _ => ReleaseAction::ReturnToStart,
    }
}
