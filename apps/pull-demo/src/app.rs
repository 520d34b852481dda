use anyhow::Context;
use pullrefresh_core::{HostClock, Runtime, RuntimeHandle, TimerRegistration, NANOS_PER_MILLI};
use pullrefresh_foundation::{PointerEvent, ScrollState, ScrollabilityOracle};
use pullrefresh_ui::{
    NormalHeader, PullContent, PullDirection, PullListener, PullRefreshError, PullRefreshLayout,
    PullStatus, WeakPullRefreshLayout,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const ROW_HEIGHT: f32 = 48.0;
const VIEWPORT_HEIGHT: f32 = 640.0;
const HEADER_EXTENT: f32 = 96.0;
const FRAME: Duration = Duration::from_millis(16);
const REFRESH_MILLIS: u64 = 2_000;
const LOAD_MILLIS: u64 = 1_500;
const LOAD_BATCH: usize = 10;

/// Scrollable list of rows. Pointer travel the pull layout leaves alone
/// scrolls the list instead.
struct ListPane {
    scroll: ScrollState,
    rows: Cell<usize>,
    top: Cell<f32>,
}

impl ListPane {
    fn new(rows: usize) -> Self {
        let pane = Self {
            scroll: ScrollState::new(0.0, 0.0),
            rows: Cell::new(0),
            top: Cell::new(0.0),
        };
        pane.set_rows(rows);
        pane
    }

    fn set_rows(&self, rows: usize) {
        self.rows.set(rows);
        let content_height = rows as f32 * ROW_HEIGHT;
        self.scroll
            .set_max_value((content_height - VIEWPORT_HEIGHT).max(0.0));
    }

    fn append_rows(&self, count: usize) {
        self.set_rows(self.rows.get() + count);
        log::info!("list now has {} rows", self.rows.get());
    }

    fn scroll_by(&self, delta: f32) {
        // Finger moving down reveals earlier rows.
        self.scroll.dispatch_raw_delta(-delta);
    }
}

impl ScrollabilityOracle for ListPane {
    fn can_scroll_up(&self) -> bool {
        self.scroll.can_scroll_up()
    }

    fn can_scroll_down(&self) -> bool {
        self.scroll.can_scroll_down()
    }
}

impl PullContent for ListPane {
    fn place(&self, top: f32) {
        self.top.set(top);
    }
}

/// Pretends to fetch data, then tells the layout it is done.
struct DemoListener {
    runtime: RuntimeHandle,
    layout: WeakPullRefreshLayout,
    pane: Rc<ListPane>,
    work: RefCell<Option<TimerRegistration>>,
}

impl DemoListener {
    fn finish_later(
        &self,
        millis: u64,
        finish: impl FnOnce(&PullRefreshLayout) -> Result<(), PullRefreshError> + 'static,
    ) {
        let layout = self.layout.clone();
        let registration = self.runtime.post_delayed(millis, move || {
            let Some(layout) = layout.upgrade() else {
                return;
            };
            if let Err(error) = finish(&layout) {
                log::warn!("listener: could not finish: {error}");
            }
        });
        *self.work.borrow_mut() = Some(registration);
    }
}

impl PullListener for DemoListener {
    fn on_normal(&self) {
        log::debug!("listener: normal");
    }

    fn on_loose(&self, direction: PullDirection) {
        log::info!("listener: release now to {}", match direction {
            PullDirection::Down => "refresh",
            PullDirection::Up => "load more",
        });
    }

    fn on_refresh_requested(&self) {
        log::info!("listener: refreshing for {REFRESH_MILLIS}ms");
        self.finish_later(REFRESH_MILLIS, |layout| layout.stop_refresh());
    }

    fn on_load_requested(&self) {
        log::info!("listener: loading for {LOAD_MILLIS}ms");
        let pane = Rc::clone(&self.pane);
        self.finish_later(LOAD_MILLIS, move |layout| {
            pane.append_rows(LOAD_BATCH);
            layout.stop_load()
        });
    }
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Press(f32),
    MoveTo(f32),
    Release,
    ScrollToBottom,
}

/// Finger script as (milliseconds from start, step).
fn script() -> Vec<(u64, Step)> {
    let mut steps = Vec::new();
    let mut gesture = |start: u64, from: f32, to: f32| {
        steps.push((start, Step::Press(from)));
        for frame in 1..=12u64 {
            let y = from + (to - from) * frame as f32 / 12.0;
            steps.push((start + frame * 16, Step::MoveTo(y)));
        }
        steps.push((start + 13 * 16, Step::Release));
    };
    gesture(200, 100.0, 300.0);
    gesture(3_500, 100.0, 160.0);
    let load_at = 5_000;
    gesture(load_at + 100, 500.0, 300.0);
    steps.push((load_at, Step::ScrollToBottom));
    steps.sort_by_key(|(at, _)| *at);
    steps
}

pub fn run() -> anyhow::Result<()> {
    let clock = HostClock::new();
    let runtime = Runtime::new();
    let layout = PullRefreshLayout::new(runtime.handle());
    let pane = Rc::new(ListPane::new(40));
    let header = Rc::new(NormalHeader::new(runtime.handle(), HEADER_EXTENT).with_indicator_top(24.0));
    let listener = Rc::new(DemoListener {
        runtime: runtime.handle(),
        layout: layout.downgrade(),
        pane: Rc::clone(&pane),
        work: RefCell::new(None),
    });

    layout
        .attach(pane.clone(), header.clone())
        .context("attaching list and header")?;
    layout
        .set_container_height(VIEWPORT_HEIGHT)
        .context("measuring container")?;
    layout.set_listener(Some(listener));

    let mut script = script().into_iter().peekable();
    let mut last_status = PullStatus::Normal;
    let mut last_top = f32::NAN;
    let mut finger_y = 0.0;

    loop {
        let now_millis = clock.now_nanos() / NANOS_PER_MILLI;
        while let Some((_, step)) = script.next_if(|(at, _)| *at <= now_millis) {
            let event = match step {
                Step::Press(y) => PointerEvent::down(0, y),
                Step::MoveTo(y) => PointerEvent::moved(0, y),
                Step::Release => PointerEvent::up(0, 0.0),
                Step::ScrollToBottom => {
                    pane.scroll.scroll_to(pane.scroll.max_value());
                    log::info!("list scrolled to the bottom");
                    continue;
                }
            };
            let consumed = layout
                .on_pointer_event(&event)
                .context("feeding pointer event")?;
            if !consumed && step_is_move(step) {
                pane.scroll_by(event.y() - finger_y);
            }
            finger_y = event.y();
        }

        runtime.advance_to(clock.now_nanos());

        let status = layout.status();
        if status != last_status {
            println!("[{now_millis:>5}ms] {:?}: {}", status, header.label());
            last_status = status;
        }
        let top = pane.top.get();
        if (top - last_top).abs() >= 1.0 {
            let frame = header.frame();
            println!(
                "[{now_millis:>5}ms] content top {top:>7.1}  header {:>6.1}  arrow {:>6.1}°",
                frame.header_top, frame.arrow_rotation
            );
            last_top = top;
        }

        if script.peek().is_none() && runtime.is_idle() {
            break;
        }
        thread::sleep(FRAME);
    }

    println!();
    println!("Done: {} rows, status {:?}", pane.rows.get(), layout.status());
    layout.detach();
    Ok(())
}

fn step_is_move(step: Step) -> bool {
    matches!(step, Step::MoveTo(_))
}
