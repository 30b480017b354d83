//! The application: state, event handling and the refresh loop.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget},
};
use tracing::{debug, info, warn};
use vitrine_backdrop::{BackdropHandle, BackdropHost, RenderSurface, acquire, presets};
use vitrine_config::Config;
use vitrine_core::{
    AnimationSpeed, Section, Signal, SignalDispatcher, SignalKind, SubscriptionId, Viewport,
};

use crate::contact::{ContactSubmission, SubmitError, Toast};
use crate::header::{self, HEADER_HEIGHT, Header};
use crate::nav::{NavEntry, NavigationHighlighter};
use crate::page::{self, PageLayout, ROW_PIXELS};
use crate::sections::{self, View};
use crate::theme::Theme;

/// Labels of the nav bar, one per section.
const NAV_LABELS: [&str; 5] = [
    Section::Home.label(),
    Section::Skills.label(),
    Section::About.label(),
    Section::Experience.label(),
    Section::Contact.label(),
];

/// Rows moved by one mouse wheel notch.
const WHEEL_STEP: i64 = 3;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 5;

/// A section's backdrop while the section is on screen.
#[derive(Debug)]
struct Mount {
    section: Section,
    handle: BackdropHandle,
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Where preference changes are saved on exit.
    config_path: Option<PathBuf>,
    /// Preferences changed since start.
    dirty: bool,
    theme: Theme,
    speed: AnimationSpeed,
    start: Instant,
    signals: Rc<RefCell<SignalDispatcher>>,
    host: BackdropHost,
    nav: Rc<RefCell<NavigationHighlighter>>,
    nav_subscription: SubscriptionId,
    mounts: Vec<Mount>,
    viewport: Viewport,
    layout: PageLayout,
    /// Scroll position in rows.
    scroll: u32,
    hovered_link: Option<usize>,
    selected_experience: usize,
    contact: ContactSubmission,
    contact_error: Option<SubmitError>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let signals = Rc::new(RefCell::new(SignalDispatcher::new()));
        let host = BackdropHost::new(signals.clone());

        let entries = NAV_LABELS.iter().map(|label| NavEntry::new(*label, 0)).collect();
        let nav = Rc::new(RefCell::new(NavigationHighlighter::new(
            entries,
            config.nav_threshold,
        )));
        let target = Rc::downgrade(&nav);
        let nav_subscription = signals
            .borrow_mut()
            .subscribe(SignalKind::Scroll, move |signal| {
                if let Signal::Scroll(position) = *signal
                    && let Some(nav) = target.upgrade()
                {
                    nav.borrow_mut().on_scroll(position);
                }
            });

        Self {
            running: false,
            theme: Theme::from_name(config.theme),
            speed: config.animation_speed,
            contact: ContactSubmission::new(config.submit_delay(), config.toast_duration()),
            config,
            config_path,
            dirty: false,
            start: Instant::now(),
            signals,
            host,
            nav,
            nav_subscription,
            mounts: Vec::new(),
            viewport: Viewport::default(),
            layout: PageLayout::new(0, []),
            scroll: 0,
            hovered_link: None,
            selected_experience: 0,
            contact_error: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.resize(Viewport::new(size.width, size.height));
        info!(
            width = size.width,
            height = size.height,
            theme = self.theme.name.label(),
            "vitrine started"
        );

        while self.running {
            self.update(self.now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }

        self.save_preferences();
        Ok(())
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    /// Advance everything time-driven to `now`: mount and unmount backdrops,
    /// run the frames that are due and tick the contact form.
    fn update(&mut self, now: Duration) {
        self.sync_mounts(now);
        let due = self.host.take_due();
        if !due.is_empty() {
            for mount in &mut self.mounts {
                mount.handle.run_frame(&due, now);
            }
        }
        self.contact.tick(now);
    }

    /// Acquire a backdrop for every visible section and release the rest.
    fn sync_mounts(&mut self, now: Duration) {
        let visible: Vec<Section> = self
            .layout
            .visible(self.scroll, self.body_area())
            .iter()
            .map(|v| v.section)
            .collect();

        self.mounts.retain(|mount| {
            let keep = visible.contains(&mount.section);
            if !keep {
                debug!(section = mount.section.label(), "backdrop unmounted");
            }
            keep
        });

        for section in visible {
            if self.mounts.iter().any(|m| m.section == section) {
                continue;
            }
            let config = presets::for_section(section, &self.theme.scene_colors())
                .with_speed(self.speed)
                .with_density(self.config.particle_density);
            let surface = (!self.viewport.is_empty()).then(|| RenderSurface::new(self.viewport));
            match acquire(config, surface, &self.host, now) {
                Ok(handle) => self.mounts.push(Mount { section, handle }),
                Err(err) => warn!(section = section.label(), %err, "backdrop not mounted"),
            }
        }
    }

    fn header_area(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.viewport.width,
            HEADER_HEIGHT.min(self.viewport.height),
        )
    }

    fn body_area(&self) -> Rect {
        let top = HEADER_HEIGHT.min(self.viewport.height);
        Rect::new(0, top, self.viewport.width, self.viewport.height - top)
    }

    fn relayout(&mut self) {
        let width = self.viewport.width;
        let profile = &self.config.profile;
        self.layout = PageLayout::new(
            self.body_area().height,
            Section::ALL.map(|s| (s, sections::content_height(s, profile, width))),
        );
        self.nav.borrow_mut().set_offsets(self.layout.offsets_px());
    }

    fn resize(&mut self, viewport: Viewport) {
        let was_empty = self.viewport.is_empty();
        self.viewport = viewport;
        self.relayout();
        if was_empty {
            // Backdrops mounted without a surface stay inert; mount again.
            self.mounts.clear();
        }
        self.signals.borrow_mut().dispatch(&Signal::Resize(viewport));
        self.scroll_to(self.scroll);
    }

    fn scroll_to(&mut self, rows: u32) {
        self.scroll = rows.min(self.layout.max_scroll(self.body_area().height));
        self.signals
            .borrow_mut()
            .dispatch(&Signal::Scroll(self.scroll * ROW_PIXELS));
    }

    fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.scroll) + delta).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX));
    }

    /// Scroll to a section and highlight its nav entry.
    fn jump_to(&mut self, index: usize) {
        let Some(span) = Section::ALL
            .get(index)
            .and_then(|section| self.layout.span(*section))
        else {
            return;
        };
        self.scroll_to(span.top);
        self.nav.borrow_mut().select(index);
    }

    fn active_section(&self) -> Section {
        Section::ALL
            .get(self.nav.borrow().active())
            .copied()
            .unwrap_or(Section::Home)
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so animations keep running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let mut timeout = self.config.frame_interval();
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.resize(Viewport::new(width, height)),
                _ => {}
            }
            // Drain whatever else is queued, then draw.
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.quit();
            return;
        }
        if self.active_section() == Section::Contact && self.on_contact_key(key) {
            return;
        }

        let page = i64::from(self.body_area().height.max(1));
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(u32::MAX),
            KeyCode::Char(c @ '1'..='5') => self.jump_to(c as usize - '1' as usize),
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('s') => self.cycle_speed(),
            KeyCode::Left if self.active_section() == Section::Experience => {
                self.selected_experience = self.selected_experience.saturating_sub(1);
            }
            KeyCode::Right if self.active_section() == Section::Experience => {
                let last = self.config.profile.experience.len().saturating_sub(1);
                self.selected_experience = (self.selected_experience + 1).min(last);
            }
            _ => {}
        }
    }

    /// Keys consumed by the contact form. Returns false for keys it ignores.
    fn on_contact_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc if self.contact.toast().is_some() => self.contact.dismiss_toast(),
            KeyCode::Tab => self.contact.form_mut().focus_next(),
            KeyCode::Enter => {
                self.contact_error = self.contact.submit(self.now()).err();
                if let Some(err) = self.contact_error {
                    debug!(%err, "contact form rejected");
                }
            }
            KeyCode::Backspace => self.contact.form_mut().backspace(),
            KeyCode::Char(c) => {
                self.contact.form_mut().push(c);
                self.contact_error = None;
            }
            _ => return false,
        }
        true
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let hit = header::link_at(self.header_area(), &NAV_LABELS, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.signals.borrow_mut().dispatch(&Signal::Pointer {
                    column: mouse.column,
                    row: mouse.row,
                });
                self.hovered_link = hit;
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = hit {
                    self.jump_to(index);
                }
            }
            _ => {}
        }
    }

    /// Cycle through available color themes. Backdrops are mounted again with
    /// the new palette.
    fn cycle_theme(&mut self) {
        self.theme = Theme::from_name(self.theme.name.next());
        self.config.theme = self.theme.name;
        self.dirty = true;
        self.mounts.clear();
        debug!(theme = self.theme.name.label(), "theme changed");
    }

    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.config.animation_speed = self.speed;
        self.dirty = true;
        self.mounts.clear();
        debug!(speed = self.speed.label(), "animation speed changed");
    }

    fn save_preferences(&self) {
        let (true, Some(path)) = (self.dirty, &self.config_path) else {
            return;
        };
        if let Err(err) = self.config.save(path) {
            warn!(%err, path = %path.display(), "could not save preferences");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.draw(area, frame.buffer_mut());
    }

    fn draw(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Block::new().style(self.theme.base()).render(area, buf);

        let view = View {
            theme: &self.theme,
            profile: &self.config.profile,
            elapsed: self.now().as_secs_f32(),
            selected_experience: self.selected_experience,
            contact: &self.contact,
            contact_error: self.contact_error,
            year: Local::now().year(),
        };

        for visible in self.layout.visible(self.scroll, self.body_area()) {
            if let Some(mount) = self.mounts.iter().find(|m| m.section == visible.section) {
                mount
                    .handle
                    .view(self.theme.background)
                    .render(visible.area, buf);
            }
            let Some(span) = self.layout.span(visible.section) else {
                continue;
            };
            let mut content = Buffer::empty(Rect::new(0, 0, area.width, span.height));
            sections::render(visible.section, &view, &mut content);
            page::blit(&content, &visible, buf);
        }

        Header {
            theme: &self.theme,
            brand: &self.config.profile.name,
            labels: &NAV_LABELS,
            active: self.nav.borrow().active(),
            hovered: self.hovered_link,
            status: format!("{} · {}", self.theme.name.label(), self.speed.label()),
        }
        .render(self.header_area(), buf);

        if let Some(toast) = self.contact.toast() {
            self.draw_toast(toast, area, buf);
        }
    }

    fn draw_toast(&self, toast: &Toast, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        let rect = Rect::new(
            area.right().saturating_sub(width + 1).max(area.x),
            area.bottom().saturating_sub(height + 1).max(area.y),
            width,
            height,
        );
        let success = Color::from(self.theme.success);
        Clear.render(rect, buf);
        Paragraph::new(vec![
            Line::styled(
                "✓ Message sent successfully!",
                self.theme.body().add_modifier(Modifier::BOLD),
            ),
            Line::styled("I'll get back to you soon.", self.theme.body()),
            Line::styled(
                format!("sent {} · Esc to dismiss", toast.sent_at.format("%H:%M:%S")),
                self.theme.muted(),
            ),
        ])
        .block(Block::bordered().border_style(Style::new().fg(success)))
        .style(self.theme.base())
        .render(rect, buf);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.mounts.clear();
        self.signals.borrow_mut().unsubscribe(self.nav_subscription);
    }
}
