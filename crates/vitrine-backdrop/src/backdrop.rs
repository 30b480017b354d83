//! Backdrop lifecycle: acquire, per-frame update, release.
//!
//! A hosting section calls [`acquire`] when it mounts and drops (or
//! explicitly releases) the returned [`BackdropHandle`] when it unmounts.
//! Between the two, the host drains the [`FrameScheduler`] once per refresh
//! and passes the batch to [`BackdropHandle::run_frame`]; every drawn frame
//! requests the next one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use fastrand::Rng;
use glam::Vec2;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use tracing::{debug, trace, warn};
use vitrine_core::{Rgb, Signal, SignalDispatcher, SignalKind, SubscriptionId, Viewport};

use crate::clock::FrameClock;
use crate::error::BackdropError;
use crate::geometry::SceneGeometry;
use crate::ledger::{ResourceGuard, ResourceKind, ResourceLedger};
use crate::raster;
use crate::scene::{SceneConfig, SceneTransform};
use crate::scheduler::{FrameBatch, FrameScheduler, FrameToken};
use crate::surface::RenderSurface;

/// Shared services every backdrop registers with.
///
/// Single-threaded: frames for one host never run concurrently.
#[derive(Debug, Clone)]
pub struct BackdropHost {
    scheduler: Rc<RefCell<FrameScheduler>>,
    signals: Rc<RefCell<SignalDispatcher>>,
    ledger: ResourceLedger,
}

impl BackdropHost {
    /// Create a host that listens for viewport signals on `signals`.
    pub fn new(signals: Rc<RefCell<SignalDispatcher>>) -> Self {
        Self {
            scheduler: Rc::new(RefCell::new(FrameScheduler::new())),
            signals,
            ledger: ResourceLedger::new(),
        }
    }

    pub fn signals(&self) -> &Rc<RefCell<SignalDispatcher>> {
        &self.signals
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Drain the frames due in this refresh.
    pub fn take_due(&self) -> FrameBatch {
        self.scheduler.borrow_mut().take_due()
    }

    /// Frames requested but not yet run.
    pub fn pending_frames(&self) -> usize {
        self.scheduler.borrow().pending()
    }
}

/// Result of offering a frame batch to a backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The scene was drawn and the next frame requested.
    Drawn,
    /// The surface has zero area; nothing drawn, next frame requested.
    Empty,
    /// No surface to draw on (inert, released or lost); nothing scheduled.
    Skipped,
    /// This backdrop had no frame in the batch.
    NotDue,
}

#[derive(Debug)]
struct Live {
    config: SceneConfig,
    geometry: SceneGeometry,
    clock: FrameClock,
    surface: Rc<RefCell<RenderSurface>>,
    pointer: Rc<Cell<Vec2>>,
    pending: Option<FrameToken>,
    subscriptions: Vec<SubscriptionId>,
    guards: Vec<ResourceGuard>,
    draw_calls: u64,
}

#[derive(Debug)]
enum State {
    /// Acquired without a surface; owns nothing.
    Inert,
    Live(Box<Live>),
    Released,
}

/// An acquired backdrop. Releasing happens at most once, on [`release`] or drop.
///
/// [`release`]: BackdropHandle::release
#[derive(Debug)]
pub struct BackdropHandle {
    host: BackdropHost,
    state: State,
}

/// Acquire a backdrop for `config` on `surface`.
///
/// An invalid config is an error and nothing is acquired. A missing surface
/// is not an error: the handle is inert and never schedules a frame.
pub fn acquire(
    config: SceneConfig,
    surface: Option<RenderSurface>,
    host: &BackdropHost,
    now: Duration,
) -> Result<BackdropHandle, BackdropError> {
    config.validate()?;

    let Some(surface) = surface else {
        debug!("no render surface; backdrop acquisition skipped");
        return Ok(BackdropHandle {
            host: host.clone(),
            state: State::Inert,
        });
    };

    let mut rng = match config.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };
    let geometry = SceneGeometry::build(&config, &mut rng);

    let mut guards = geometry.track(&host.ledger);
    guards.push(host.ledger.track(ResourceKind::Surface));

    let viewport = surface.viewport();
    let surface = Rc::new(RefCell::new(surface));
    let pointer = Rc::new(Cell::new(Vec2::ZERO));

    let mut subscriptions = Vec::with_capacity(2);
    {
        let mut signals = host.signals.borrow_mut();
        let target = Rc::downgrade(&surface);
        subscriptions.push(signals.subscribe(SignalKind::Resize, move |signal| {
            let Signal::Resize(viewport) = *signal else {
                return;
            };
            let Some(shared) = target.upgrade() else {
                trace!("resize for a dropped surface ignored");
                return;
            };
            let Ok(mut surface) = shared.try_borrow_mut() else {
                warn!("surface busy; resize dropped");
                return;
            };
            surface.resize(viewport);
        }));

        if config.motion.parallax != 0.0 {
            let target = Rc::downgrade(&surface);
            let pointer = pointer.clone();
            subscriptions.push(signals.subscribe(SignalKind::Pointer, move |signal| {
                let Signal::Pointer { column, row } = *signal else {
                    return;
                };
                let Some(shared) = target.upgrade() else {
                    return;
                };
                let Ok(surface) = shared.try_borrow() else {
                    return;
                };
                pointer.set(normalize_pointer(column, row, surface.viewport()));
            }));
        }
    }

    let pending = Some(host.scheduler.borrow_mut().request());
    debug!(
        particles = config.particle_count,
        rings = config.rings.len(),
        width = viewport.width,
        height = viewport.height,
        resources = guards.len(),
        "backdrop acquired"
    );

    Ok(BackdropHandle {
        host: host.clone(),
        state: State::Live(Box::new(Live {
            config,
            geometry,
            clock: FrameClock::start(now),
            surface,
            pointer,
            pending,
            subscriptions,
            guards,
            draw_calls: 0,
        })),
    })
}

/// Map a pointer cell to `[-1, 1]²` with +y up.
fn normalize_pointer(column: u16, row: u16, viewport: Viewport) -> Vec2 {
    let w = viewport.width.max(1) as f32;
    let h = viewport.height.max(1) as f32;
    Vec2::new(
        (column as f32 / w * 2.0 - 1.0).clamp(-1.0, 1.0),
        (-(row as f32 / h) * 2.0 + 1.0).clamp(-1.0, 1.0),
    )
}

impl BackdropHandle {
    /// Run this backdrop's frame if it is in `due`.
    pub fn run_frame(&mut self, due: &FrameBatch, now: Duration) -> FrameOutcome {
        let host = &self.host;
        let State::Live(live) = &mut self.state else {
            return FrameOutcome::Skipped;
        };
        let Some(token) = live.pending else {
            return FrameOutcome::Skipped;
        };
        if !due.contains(token) {
            return FrameOutcome::NotDue;
        }
        live.pending = None;

        let outcome = {
            let Ok(mut surface) = live.surface.try_borrow_mut() else {
                trace!("surface busy; frame skipped");
                live.pending = Some(host.scheduler.borrow_mut().request());
                return FrameOutcome::Skipped;
            };
            if surface.is_disposed() {
                debug!("surface lost; frame discarded");
                return FrameOutcome::Skipped;
            }
            if surface.viewport().is_empty() {
                FrameOutcome::Empty
            } else {
                let t = live.clock.elapsed_secs(now);
                let transform = SceneTransform::at(&live.config, t)
                    .with_pointer(live.pointer.get(), live.config.motion.parallax);
                let projection = *surface.projection();
                raster::draw(
                    &live.geometry,
                    &live.config,
                    &transform,
                    &projection,
                    surface.buffer_mut(),
                );
                live.draw_calls += 1;
                FrameOutcome::Drawn
            }
        };

        live.pending = Some(host.scheduler.borrow_mut().request());
        outcome
    }

    /// Cancel the pending frame, drop the signal listeners and free every
    /// resource. Safe to call any number of times.
    pub fn release(&mut self) {
        let State::Live(live) = std::mem::replace(&mut self.state, State::Released) else {
            return;
        };
        let Live {
            surface,
            pending,
            subscriptions,
            guards,
            draw_calls,
            ..
        } = *live;

        if let Some(token) = pending {
            match self.host.scheduler.try_borrow_mut() {
                Ok(mut scheduler) => {
                    scheduler.cancel(token);
                }
                Err(_) => warn!("scheduler busy; pending frame left to expire"),
            }
        }

        match self.host.signals.try_borrow_mut() {
            Ok(mut signals) => {
                for id in subscriptions {
                    signals.unsubscribe(id);
                }
            }
            Err(_) => warn!("released while dispatching; listeners will ignore the dropped surface"),
        }

        if let Ok(mut surface) = surface.try_borrow_mut() {
            surface.dispose();
        }
        drop(guards);
        debug!(draw_calls, "backdrop released");
    }

    /// Report that the display target went away. Frames already in flight
    /// are discarded and no further frames are scheduled; resources are
    /// still freed by [`release`](Self::release).
    pub fn lose_surface(&mut self) {
        if let State::Live(live) = &self.state
            && let Ok(mut surface) = live.surface.try_borrow_mut()
        {
            surface.dispose();
        }
    }

    /// True between a successful acquisition with a surface and release.
    pub fn is_live(&self) -> bool {
        matches!(self.state, State::Live(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, State::Released)
    }

    /// Number of frames drawn so far.
    pub fn draw_calls(&self) -> u64 {
        match &self.state {
            State::Live(live) => live.draw_calls,
            _ => 0,
        }
    }

    /// Current surface size, if live.
    pub fn viewport(&self) -> Option<Viewport> {
        match &self.state {
            State::Live(live) => live.surface.try_borrow().ok().map(|s| s.viewport()),
            _ => None,
        }
    }

    /// A widget compositing the last drawn frame over `background`.
    pub fn view(&self, background: Rgb) -> BackdropView<'_> {
        BackdropView {
            handle: self,
            background,
        }
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Composites a backdrop's surface into a frame.
///
/// Surface cells map to frame cells at the same coordinates, so the backdrop
/// stays fixed behind scrolling content.
#[derive(Debug)]
pub struct BackdropView<'a> {
    handle: &'a BackdropHandle,
    background: Rgb,
}

impl Widget for BackdropView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let State::Live(live) = &self.handle.state else {
            return;
        };
        let Ok(surface) = live.surface.try_borrow() else {
            return;
        };
        let opacity = live.config.opacity;
        let src = surface.buffer();
        let clip = area.intersection(src.area).intersection(buf.area);

        for y in clip.top()..clip.bottom() {
            for x in clip.left()..clip.right() {
                let Some(cell) = src.cell((x, y)) else {
                    continue;
                };
                if cell.symbol() == " " {
                    continue;
                }
                let fg: Color = match cell.fg {
                    Color::Rgb(r, g, b) => self.background.mix(Rgb(r, g, b), opacity).into(),
                    other => other,
                };
                if let Some(dst) = buf.cell_mut((x, y)) {
                    dst.set_symbol(cell.symbol()).set_fg(fg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> BackdropHost {
        BackdropHost::new(Rc::new(RefCell::new(SignalDispatcher::new())))
    }

    fn seeded() -> SceneConfig {
        SceneConfig {
            seed: Some(42),
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_acquire_schedules_first_frame() {
        let host = host();
        let handle = acquire(
            seeded(),
            Some(RenderSurface::new(Viewport::new(40, 12))),
            &host,
            Duration::ZERO,
        )
        .unwrap();
        assert!(handle.is_live());
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(host.signals().borrow().listener_count(SignalKind::Resize), 1);
        assert!(host.ledger().live() > 0);
    }

    #[test]
    fn test_missing_surface_is_inert() {
        let host = host();
        let mut handle = acquire(seeded(), None, &host, Duration::ZERO).unwrap();
        assert!(!handle.is_live());
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.ledger().live(), 0);
        assert!(host.signals().borrow().is_empty());
        assert_eq!(
            handle.run_frame(&host.take_due(), Duration::from_secs(1)),
            FrameOutcome::Skipped
        );
    }

    #[test]
    fn test_invalid_config_acquires_nothing() {
        let host = host();
        let config = SceneConfig {
            palette: Vec::new(),
            ..seeded()
        };
        let result = acquire(
            config,
            Some(RenderSurface::new(Viewport::new(10, 10))),
            &host,
            Duration::ZERO,
        );
        assert_eq!(result.err(), Some(BackdropError::EmptyPalette));
        assert_eq!(host.ledger().live(), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_frame_draws_and_reschedules() {
        let host = host();
        let mut handle = acquire(
            seeded(),
            Some(RenderSurface::new(Viewport::new(40, 12))),
            &host,
            Duration::ZERO,
        )
        .unwrap();

        let due = host.take_due();
        assert_eq!(
            handle.run_frame(&due, Duration::from_millis(16)),
            FrameOutcome::Drawn
        );
        assert_eq!(handle.draw_calls(), 1);
        assert_eq!(host.pending_frames(), 1);

        // The same batch does not run the frame twice.
        assert_eq!(
            handle.run_frame(&due, Duration::from_millis(20)),
            FrameOutcome::NotDue
        );
        assert_eq!(handle.draw_calls(), 1);
    }

    #[test]
    fn test_pointer_normalization() {
        let vp = Viewport::new(100, 50);
        assert_eq!(normalize_pointer(0, 0, vp), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(50, 25, vp), Vec2::new(0.0, 0.0));
        assert_eq!(normalize_pointer(500, 500, vp), Vec2::new(1.0, -1.0));
    }
}
