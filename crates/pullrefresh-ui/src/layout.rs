//! The pull interaction controller.
//!
//! [`PullRefreshLayout`] hosts one scrollable content child and one header
//! presenter. It turns pointer events into a damped content offset, runs the
//! pull status machine, and eases the offset to rest or to the revealed
//! header/footer when a gesture ends or the host finishes a refresh or load.
//!
//! State lives behind a single `RefCell`. Every public entry point mutates it
//! inside [`PullRefreshLayout::update`], which queues notifications instead of
//! calling collaborators directly. The queue is flushed once the borrow is
//! released, so collaborators can call straight back into the layout.

use crate::config::PullRefreshConfig;
use crate::error::{validate_extent, ConfigurationError, PullRefreshError};
use crate::gesture::{GestureSession, MoveOutcome, ScrollSnapshot};
use crate::offset::OffsetModel;
use crate::presenter::{HeaderPresenter, PullChild, PullContent, PullListener};
use crate::settle::{SettleAnimation, SettleTarget};
use crate::status::{self, PullDirection, PullStatus, ReleaseAction};
use pullrefresh_core::{RuntimeHandle, TimerRegistration};
use pullrefresh_foundation::{PointerEvent, PointerEventKind};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Side effects queued while the controller state is borrowed.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Notification {
    Offset { current: f32, previous: f32 },
    /// Content must be re-placed without an offset change.
    Placed,
    Status(PullStatus),
    Normal,
    Loose(PullDirection),
    RefreshRequested,
    LoadRequested,
}

type Notifications = SmallVec<[Notification; 4]>;

#[derive(Clone, Copy, Debug, Default)]
struct Measurements {
    header_extent: f32,
    /// Mirrors the header extent until set.
    footer_extent: Option<f32>,
    content_rest: f32,
    container_height: Option<f32>,
}

struct PullRefreshInner {
    this: Weak<RefCell<PullRefreshInner>>,
    config: PullRefreshConfig,
    runtime: RuntimeHandle,
    content: Option<Rc<dyn PullContent>>,
    header: Option<Rc<dyn HeaderPresenter>>,
    listener: Option<Rc<dyn PullListener>>,
    measurements: Measurements,
    offset_model: OffsetModel,
    status: PullStatus,
    current_offset: f32,
    enabled: bool,
    down_pull_enabled: bool,
    up_pull_enabled: bool,
    disabled_for_gesture: bool,
    returning_to_start: bool,
    session: GestureSession,
    settle: SettleAnimation,
    pending_cancel: Option<TimerRegistration>,
}

/// Collaborators captured for one dispatch pass.
struct Targets {
    content: Option<Rc<dyn PullContent>>,
    header: Option<Rc<dyn HeaderPresenter>>,
    listener: Option<Rc<dyn PullListener>>,
    content_rest: f32,
    current_offset: f32,
}

/// Pull-to-refresh / pull-to-load controller.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct PullRefreshLayout {
    inner: Rc<RefCell<PullRefreshInner>>,
}

impl PullRefreshLayout {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self::with_config(runtime, PullRefreshConfig::default())
    }

    pub fn with_config(runtime: RuntimeHandle, config: PullRefreshConfig) -> Self {
        let trigger = config.fallback_trigger_distance(None);
        let inner = Rc::new_cyclic(|this| {
            RefCell::new(PullRefreshInner {
                this: this.clone(),
                config,
                settle: SettleAnimation::new(runtime.clone()),
                runtime,
                content: None,
                header: None,
                listener: None,
                measurements: Measurements::default(),
                offset_model: OffsetModel::new(trigger),
                status: PullStatus::Normal,
                current_offset: 0.0,
                enabled: true,
                down_pull_enabled: true,
                up_pull_enabled: true,
                disabled_for_gesture: false,
                returning_to_start: false,
                session: GestureSession::default(),
                pending_cancel: None,
            })
        });
        Self { inner }
    }

    fn from_inner(inner: Rc<RefCell<PullRefreshInner>>) -> Self {
        Self { inner }
    }

    /// A handle that does not keep the controller alive. Collaborators the
    /// controller owns, such as its listener, should hold one of these.
    pub fn downgrade(&self) -> WeakPullRefreshLayout {
        WeakPullRefreshLayout {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // ---------------------------------------------------------------------
    // Attachment and layout
    // ---------------------------------------------------------------------

    /// Injects the content pane and the header presenter.
    ///
    /// A header that reports [`HeaderPresenter::measured_extent`] establishes
    /// the header extent here; a later [`PullRefreshLayout::configure`] wins.
    pub fn attach(
        &self,
        content: Rc<dyn PullContent>,
        header: Rc<dyn HeaderPresenter>,
    ) -> Result<(), PullRefreshError> {
        let measured = header
            .measured_extent()
            .map(|extent| validate_extent("header extent", extent))
            .transpose()?;
        self.update(|inner, out| {
            inner.content = Some(content);
            inner.header = Some(header);
            if let Some(extent) = measured {
                inner.measurements.header_extent = extent;
            }
            out.push(Notification::Placed);
        });
        self.recompute_trigger_distance();
        log::debug!("pull layout attached");
        Ok(())
    }

    /// Attaches from a child list, which must hold exactly one header and
    /// one content child.
    pub fn attach_children(&self, children: Vec<PullChild>) -> Result<(), PullRefreshError> {
        if children.len() > 2 {
            return Err(ConfigurationError::TooManyChildren {
                count: children.len(),
            }
            .into());
        }
        let mut header = None;
        let mut content = None;
        for child in children {
            let role = child.role();
            let duplicate = match child {
                PullChild::Header(presenter) => header.replace(presenter).is_some(),
                PullChild::Content(pane) => content.replace(pane).is_some(),
            };
            if duplicate {
                return Err(ConfigurationError::DuplicateChild { role }.into());
            }
        }
        let header = header.ok_or(ConfigurationError::MissingChild { role: "header" })?;
        let content = content.ok_or(ConfigurationError::MissingChild { role: "content" })?;
        self.attach(content, header)
    }

    /// Stops every animation and timer and releases content and header.
    ///
    /// The listener stays registered.
    pub fn detach(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.settle.cancel();
        inner.pending_cancel = None;
        inner.session.reset();
        inner.content = None;
        inner.header = None;
        inner.status = PullStatus::Normal;
        inner.current_offset = 0.0;
        inner.disabled_for_gesture = false;
        inner.returning_to_start = false;
        log::debug!("pull layout detached");
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().is_attached()
    }

    /// Establishes the header extent and the content's rest position, as
    /// measured by the host's own layout pass.
    pub fn configure(&self, header_extent: f32, content_rest: f32) -> Result<(), PullRefreshError> {
        let header_extent = validate_extent("header extent", header_extent)?;
        let content_rest = validate_extent("content rest position", content_rest)?;
        self.update(|inner, out| {
            inner.measurements.header_extent = header_extent;
            inner.measurements.content_rest = content_rest;
            out.push(Notification::Placed);
        });
        self.recompute_trigger_distance();
        Ok(())
    }

    /// Extent revealed while loading. Defaults to the header extent.
    pub fn set_footer_extent(&self, footer_extent: f32) -> Result<(), PullRefreshError> {
        let footer_extent = validate_extent("footer extent", footer_extent)?;
        self.inner.borrow_mut().measurements.footer_extent = Some(footer_extent);
        Ok(())
    }

    /// Height of the hosting container; caps the fallback trigger distance.
    pub fn set_container_height(&self, height: f32) -> Result<(), PullRefreshError> {
        let height = validate_extent("container height", height)?;
        self.inner.borrow_mut().measurements.container_height = Some(height);
        self.recompute_trigger_distance();
        Ok(())
    }

    fn recompute_trigger_distance(&self) {
        let (header, extent, fallback) = {
            let inner = self.inner.borrow();
            (
                inner.header.clone(),
                inner.measurements.header_extent,
                inner
                    .config
                    .fallback_trigger_distance(inner.measurements.container_height),
            )
        };
        let trigger = match header {
            Some(header) if extent > 0.0 => header.distance_to_trigger(extent),
            _ => fallback,
        };
        log::debug!("pull trigger distance {trigger}");
        self.inner.borrow_mut().offset_model = OffsetModel::new(trigger);
    }

    // ---------------------------------------------------------------------
    // Configuration flags
    // ---------------------------------------------------------------------

    pub fn set_listener(&self, listener: Option<Rc<dyn PullListener>>) {
        self.inner.borrow_mut().listener = listener;
    }

    /// Master switch. Disabling mid-drag ends the drag like a cancel.
    pub fn set_enabled(&self, enabled: bool) {
        self.update(|inner, out| {
            inner.enabled = enabled;
            if !enabled {
                inner.end_sequence(true, out);
            }
        });
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }

    pub fn set_down_pull_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().down_pull_enabled = enabled;
    }

    pub fn is_down_pull_enabled(&self) -> bool {
        self.inner.borrow().down_pull_enabled
    }

    pub fn set_up_pull_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().up_pull_enabled = enabled;
    }

    pub fn is_up_pull_enabled(&self) -> bool {
        self.inner.borrow().up_pull_enabled
    }

    // ---------------------------------------------------------------------
    // Refresh / load lifecycle
    // ---------------------------------------------------------------------

    /// `true` forces `Refreshing` and reveals the header without a drag.
    /// `false` behaves like [`PullRefreshLayout::stop_refresh`].
    pub fn set_refreshing(&self, refreshing: bool) -> Result<(), PullRefreshError> {
        self.set_active(PullDirection::Down, refreshing, "set_refreshing")
    }

    /// `true` forces `Loading` and reveals the footer without a drag.
    /// `false` behaves like [`PullRefreshLayout::stop_load`].
    pub fn set_loading(&self, loading: bool) -> Result<(), PullRefreshError> {
        self.set_active(PullDirection::Up, loading, "set_loading")
    }

    fn set_active(
        &self,
        direction: PullDirection,
        active: bool,
        operation: &'static str,
    ) -> Result<(), PullRefreshError> {
        if !self.is_attached() {
            return Err(PullRefreshError::NotAttached { operation });
        }
        self.update(|inner, out| {
            if !active {
                inner.finish_active(out);
            } else if inner.status != PullStatus::active(direction) {
                inner.session.reset();
                inner.commit(direction, false, out);
            }
        });
        Ok(())
    }

    /// Ends a refresh: status returns to `Normal` from whatever state it is
    /// in and the content eases back to rest. New pulls are accepted once it
    /// gets there. A drag in progress is dropped.
    pub fn stop_refresh(&self) -> Result<(), PullRefreshError> {
        self.set_active(PullDirection::Down, false, "stop_refresh")
    }

    /// Ends a load; see [`PullRefreshLayout::stop_refresh`].
    pub fn stop_load(&self) -> Result<(), PullRefreshError> {
        self.set_active(PullDirection::Up, false, "stop_load")
    }

    /// Always `false` while detached.
    pub fn is_refreshing(&self) -> bool {
        self.status() == PullStatus::Refreshing
    }

    /// Always `false` while detached.
    pub fn is_loading(&self) -> bool {
        self.status() == PullStatus::Loading
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Feeds one pointer event through the controller.
    ///
    /// Returns `Ok(true)` and consumes the event while a pull owns the
    /// gesture; `Ok(false)` leaves it to the content.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> Result<bool, PullRefreshError> {
        let content = self
            .inner
            .borrow()
            .attached_content()
            .ok_or(PullRefreshError::NotAttached {
                operation: "on_pointer_event",
            })?;
        let scroll = ScrollSnapshot::sample(content.as_ref());
        let consumed = self.update(|inner, out| inner.handle_pointer(event, scroll, out));
        if consumed {
            event.consume();
        }
        Ok(consumed)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn status(&self) -> PullStatus {
        self.inner.borrow().status
    }

    /// Signed offset from rest: positive reveals the header, negative the
    /// footer.
    pub fn current_offset(&self) -> f32 {
        self.inner.borrow().current_offset
    }

    pub fn trigger_distance(&self) -> f32 {
        self.inner.borrow().offset_model.trigger_distance()
    }

    pub fn header_extent(&self) -> f32 {
        self.inner.borrow().measurements.header_extent
    }

    pub fn footer_extent(&self) -> f32 {
        self.inner.borrow().footer_extent()
    }

    pub fn is_returning_to_start(&self) -> bool {
        self.inner.borrow().returning_to_start
    }

    pub fn is_gesture_disabled(&self) -> bool {
        self.inner.borrow().disabled_for_gesture
    }

    /// True while a pull owns the current touch sequence.
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().session.is_dragging()
    }

    // ---------------------------------------------------------------------
    // Plumbing
    // ---------------------------------------------------------------------

    fn update<R>(&self, f: impl FnOnce(&mut PullRefreshInner, &mut Notifications) -> R) -> R {
        let mut notifications = Notifications::new();
        let (result, targets) = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner, &mut notifications);
            (result, inner.targets())
        };
        targets.dispatch(&notifications);
        result
    }

    fn settle_frame(&self, value: f32) {
        self.update(|inner, out| inner.apply_offset(value, out));
    }

    fn settle_finished(&self, target: SettleTarget) {
        self.update(|inner, _| inner.finish_settle(target));
    }

    fn run_pending_cancel(&self) {
        self.update(|inner, _| {
            inner.pending_cancel = None;
            if !inner.status.is_busy() && !inner.session.is_dragging() {
                inner.settle_to(SettleTarget::Rest);
            }
        });
    }
}

/// Non-owning counterpart of [`PullRefreshLayout`].
#[derive(Clone)]
pub struct WeakPullRefreshLayout {
    inner: Weak<RefCell<PullRefreshInner>>,
}

impl WeakPullRefreshLayout {
    pub fn upgrade(&self) -> Option<PullRefreshLayout> {
        self.inner.upgrade().map(PullRefreshLayout::from_inner)
    }
}

impl fmt::Debug for PullRefreshLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PullRefreshLayout")
            .field("status", &inner.status)
            .field("current_offset", &inner.current_offset)
            .field("trigger_distance", &inner.offset_model.trigger_distance())
            .field("attached", &inner.is_attached())
            .finish()
    }
}

impl PullRefreshInner {
    fn is_attached(&self) -> bool {
        self.content.is_some() && self.header.is_some()
    }

    fn attached_content(&self) -> Option<Rc<dyn PullContent>> {
        self.header.as_ref()?;
        self.content.clone()
    }

    fn footer_extent(&self) -> f32 {
        self.measurements
            .footer_extent
            .unwrap_or(self.measurements.header_extent)
    }

    fn accepts_gestures(&self) -> bool {
        self.enabled
            && !self.returning_to_start
            && !self.disabled_for_gesture
            && !self.status.is_busy()
    }

    fn targets(&self) -> Targets {
        Targets {
            content: self.content.clone(),
            header: self.header.clone(),
            listener: self.listener.clone(),
            content_rest: self.measurements.content_rest,
            current_offset: self.current_offset,
        }
    }

    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        scroll: ScrollSnapshot,
        out: &mut Notifications,
    ) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                // A new sequence supersedes the cool-down of the previous one.
                self.pending_cancel = None;
                self.returning_to_start = false;
                self.session.begin(event.id, event.y());
                if !self.accepts_gestures() || scroll.is_ambiguous() {
                    self.session.refuse();
                }
                false
            }
            PointerEventKind::PointerDown => match self.session.add_pointer(event.id, event.y()) {
                Ok(()) => self.session.is_dragging(),
                Err(error) => self.recover(error, out),
            },
            PointerEventKind::PointerUp => match self.session.remove_pointer(event.id) {
                Ok(()) => self.session.is_dragging(),
                Err(error) => self.recover(error, out),
            },
            PointerEventKind::Move => self.handle_move(event, scroll, out),
            PointerEventKind::Up => self.end_sequence(false, out),
            PointerEventKind::Cancel => self.end_sequence(true, out),
        }
    }

    fn handle_move(
        &mut self,
        event: &PointerEvent,
        scroll: ScrollSnapshot,
        out: &mut Notifications,
    ) -> bool {
        match self.session.track_move(event.id, event.y()) {
            Ok(MoveOutcome::Active) => {}
            Ok(MoveOutcome::Secondary) => return self.session.is_dragging(),
            Err(error) => return self.recover(error, out),
        }
        let direction = match self.session.mode() {
            Some(direction) => direction,
            None => {
                if !self.accepts_gestures() {
                    return false;
                }
                let slop = self.config.scaled_touch_slop();
                let (down, up) = (self.down_pull_enabled, self.up_pull_enabled);
                let Some(direction) = self.session.classify(slop, scroll, down, up) else {
                    return false;
                };
                self.begin_drag(direction);
                direction
            }
        };
        self.drag(direction, out);
        true
    }

    /// Takes over from whatever is moving the content so the drag continues
    /// from the current offset.
    fn begin_drag(&mut self, direction: PullDirection) {
        self.settle.cancel();
        self.pending_cancel = None;
        self.returning_to_start = false;
        let base = self.offset_model.undamp(direction, self.current_offset);
        let travel = self.session.displacement();
        self.session.anchor_displacement(base + travel);
        log::debug!("pull drag recognized: {direction:?}");
    }

    fn drag(&mut self, direction: PullDirection, out: &mut Notifications) {
        let displacement = self.session.displacement();
        let trigger = self.offset_model.trigger_distance();
        if let Some(next) = status::on_drag(self.status, direction, displacement, trigger) {
            self.transition(next, out);
        }
        let offset = self.offset_model.damp(direction, displacement);
        self.apply_offset(offset, out);
    }

    /// Ends the touch sequence. Returns whether a pull owned it.
    fn end_sequence(&mut self, cancelled: bool, out: &mut Notifications) -> bool {
        let was_dragging = self.session.is_dragging();
        self.session.reset();
        if !was_dragging {
            // A tap during the cool-down still has to bring the content home.
            if !self.status.is_busy() && !self.settle.is_running() {
                self.schedule_return_to_start();
            }
            return false;
        }
        if cancelled {
            if self.status.is_loosened() {
                self.transition(PullStatus::Normal, out);
            }
            self.schedule_return_to_start();
        } else {
            match status::on_release(self.status) {
                ReleaseAction::Commit(direction) => self.commit(direction, true, out),
                ReleaseAction::ReturnToStart => self.schedule_return_to_start(),
            }
        }
        true
    }

    fn recover(&mut self, error: PullRefreshError, out: &mut Notifications) -> bool {
        log::warn!("pointer event ignored: {error}");
        self.end_sequence(true, out);
        false
    }

    fn commit(&mut self, direction: PullDirection, requested: bool, out: &mut Notifications) {
        self.pending_cancel = None;
        self.transition(PullStatus::active(direction), out);
        if requested {
            out.push(match direction {
                PullDirection::Down => Notification::RefreshRequested,
                PullDirection::Up => Notification::LoadRequested,
            });
        }
        let target = match direction {
            PullDirection::Down => SettleTarget::Header,
            PullDirection::Up => SettleTarget::Footer,
        };
        self.settle_to(target);
    }

    /// Host-driven return to `Normal`, whichever state the pull is in.
    fn finish_active(&mut self, out: &mut Notifications) {
        self.pending_cancel = None;
        if self.session.is_dragging() {
            self.session.abandon();
        }
        self.transition(PullStatus::Normal, out);
        self.settle_to(SettleTarget::Rest);
    }

    fn schedule_return_to_start(&mut self) {
        self.pending_cancel = None;
        if self.current_offset == 0.0 {
            return;
        }
        let this = self.this.clone();
        let delay = self.config.return_to_start_delay_millis;
        log::debug!("return to start in {delay}ms");
        self.pending_cancel = Some(self.runtime.post_delayed(delay, move || {
            if let Some(inner) = this.upgrade() {
                PullRefreshLayout::from_inner(inner).run_pending_cancel();
            }
        }));
    }

    /// Eases from the live offset to `target`. Replaces any settle in flight.
    fn settle_to(&mut self, target: SettleTarget) {
        let footer = self.footer_extent();
        let from = self.current_offset;
        let to = target.offset(self.measurements.header_extent, footer);
        self.returning_to_start = target == SettleTarget::Rest;
        if from == to {
            self.settle.cancel();
            self.finish_settle(target);
            return;
        }
        log::debug!("settle {target:?}: {from} -> {to}");
        let frame_target = self.this.clone();
        let end_target = self.this.clone();
        self.settle.restart(
            from,
            to,
            target.bounds(footer),
            self.config.settle_spec(),
            move |value| {
                if let Some(inner) = frame_target.upgrade() {
                    PullRefreshLayout::from_inner(inner).settle_frame(value);
                }
            },
            move || {
                if let Some(inner) = end_target.upgrade() {
                    PullRefreshLayout::from_inner(inner).settle_finished(target);
                }
            },
        );
    }

    fn finish_settle(&mut self, target: SettleTarget) {
        log::debug!("settle {target:?} finished at {}", self.current_offset);
        if target == SettleTarget::Rest {
            self.returning_to_start = false;
            if !self.status.is_busy() {
                self.disabled_for_gesture = false;
            }
        }
    }

    fn transition(&mut self, next: PullStatus, out: &mut Notifications) {
        let previous = self.status;
        if previous == next {
            return;
        }
        self.status = next;
        if next.is_busy() {
            self.disabled_for_gesture = true;
        }
        log::debug!("pull status {previous:?} -> {next:?}");
        out.push(Notification::Status(next));
        match next {
            PullStatus::Normal => out.push(Notification::Normal),
            PullStatus::LoosenRefresh => out.push(Notification::Loose(PullDirection::Down)),
            PullStatus::LoosenLoad => out.push(Notification::Loose(PullDirection::Up)),
            PullStatus::Refreshing | PullStatus::Loading => {}
        }
    }

    fn apply_offset(&mut self, offset: f32, out: &mut Notifications) {
        let previous = self.current_offset;
        if previous == offset {
            return;
        }
        self.current_offset = offset;
        log::trace!("pull offset {previous} -> {offset}");
        out.push(Notification::Offset {
            current: offset,
            previous,
        });
    }
}

impl Targets {
    fn dispatch(&self, notifications: &[Notification]) {
        for notification in notifications {
            match *notification {
                Notification::Offset { current, previous } => {
                    if let Some(content) = &self.content {
                        content.place(self.content_rest + current);
                    }
                    if let Some(header) = &self.header {
                        header.offset_changed(current, previous);
                    }
                }
                Notification::Placed => {
                    if let Some(content) = &self.content {
                        content.place(self.content_rest + self.current_offset);
                    }
                }
                Notification::Status(status) => {
                    if let Some(header) = &self.header {
                        header.status_changed(status);
                    }
                }
                Notification::Normal => self.notify(|listener| listener.on_normal()),
                Notification::Loose(direction) => {
                    self.notify(|listener| listener.on_loose(direction))
                }
                Notification::RefreshRequested => {
                    self.notify(|listener| listener.on_refresh_requested())
                }
                Notification::LoadRequested => self.notify(|listener| listener.on_load_requested()),
            }
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn PullListener)) {
        if let Some(listener) = &self.listener {
            f(listener.as_ref());
        }
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
