use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use paintflash_core::{Overlay, PaintflashConfig, RenderProfiler, svg::render_svg};
use paintflash_protocol::{RenderCommand, ThemeToken};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect as Area,
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
};
use tracing::{debug, info, warn};

use crate::demo::{self, Demo};
use crate::theme;

/// Frame interval while highlights are fading.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Wake-up interval when nothing is on screen.
const IDLE_POLL: Duration = Duration::from_millis(250);
const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(400);

pub struct Options {
    pub svg_out: PathBuf,
    pub autoplay: bool,
    pub seed: Option<u64>,
}

struct App {
    profiler: RenderProfiler,
    overlay: Overlay,
    demo: Demo,
    svg_out: PathBuf,
    autoplay: bool,
    next_autoplay: Option<Instant>,
    status: String,
    layout_for: Area,
}

pub fn run(config: &PaintflashConfig, options: Options) -> Result<()> {
    let registry = paintflash_core::HighlightRegistry::new(config.registry_config());
    let overlay = Overlay::mount_with_style(&registry, config.overlay);
    let profiler = RenderProfiler::new(registry, config.render_thresholds());
    let mut app = App {
        profiler,
        overlay,
        demo: Demo::new(options.seed),
        svg_out: options.svg_out,
        autoplay: options.autoplay,
        next_autoplay: None,
        status: String::from("press space to render"),
        layout_for: Area::default(),
    };

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.overlay.unmount();
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let registry = app.profiler.registry().clone();
        registry.tick();
        let now = registry.now();

        let size = terminal.size()?;
        let content = Area::new(0, 1, size.width, size.height.saturating_sub(2));
        if content != app.layout_for {
            app.demo.layout(content);
            app.layout_for = content;
        }

        let commands = app.overlay.render(now);
        terminal.draw(|frame| draw(frame, app, &commands))?;

        if app.autoplay {
            let due = *app.next_autoplay.get_or_insert(now + AUTOPLAY_INTERVAL);
            if now >= due {
                app.demo.render_random(&mut app.profiler);
                app.next_autoplay = Some(now + AUTOPLAY_INTERVAL);
            }
        }

        let timeout = poll_timeout(
            app.overlay.is_animating(),
            registry.next_deadline(),
            app.autoplay.then_some(app.next_autoplay).flatten(),
            now,
        );
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                code => handle_key(app, code, &commands, size.width, size.height)?,
            }
        }
    }
    Ok(())
}

fn handle_key(
    app: &mut App,
    code: KeyCode,
    commands: &[RenderCommand],
    width: u16,
    height: u16,
) -> Result<()> {
    match code {
        KeyCode::Char(' ') => {
            app.demo.burst(&mut app.profiler);
            app.status = format!("{} highlights", app.profiler.registry().len());
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            app.demo.render(index, &mut app.profiler);
            if let Some(component) = app.demo.components().get(index)
                && let Some(stats) = app.profiler.stats(component.name)
            {
                app.status = format!(
                    "{}: {:.1}ms ({})",
                    component.name,
                    stats.mean().as_secs_f64() * 1000.0,
                    demo::describe(stats.last_class)
                );
            }
        }
        KeyCode::Char('a') => {
            app.autoplay = !app.autoplay;
            app.next_autoplay = None;
            app.status = format!("autoplay {}", if app.autoplay { "on" } else { "off" });
        }
        KeyCode::Char('p') => {
            let enabled = !app.profiler.is_enabled();
            app.profiler.set_enabled(enabled);
            app.status = format!("profiling {}", if enabled { "on" } else { "paused" });
        }
        KeyCode::Char('c') => {
            app.profiler.registry().clear();
            app.status = String::from("cleared");
        }
        KeyCode::Char('r') => {
            app.profiler.reset();
            app.status = String::from("stats reset");
        }
        KeyCode::Char('s') => {
            let svg = render_svg(commands, f64::from(width), f64::from(height), true);
            std::fs::write(&app.svg_out, svg)
                .with_context(|| format!("writing {}", app.svg_out.display()))?;
            info!(path = %app.svg_out.display(), "saved overlay frame");
            app.status = format!("saved {}", app.svg_out.display());
        }
        other => debug!(?other, "unbound key"),
    }
    Ok(())
}

/// How long to wait for input before drawing the next frame.
fn poll_timeout(
    animating: bool,
    next_deadline: Option<Instant>,
    next_autoplay: Option<Instant>,
    now: Instant,
) -> Duration {
    let mut timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };
    for at in [next_deadline, next_autoplay].into_iter().flatten() {
        timeout = timeout.min(at.saturating_duration_since(now));
    }
    timeout
}

fn draw(frame: &mut Frame, app: &App, commands: &[RenderCommand]) {
    let area = frame.area();

    let header_area = Area::new(0, 0, area.width, 1);
    let header = Paragraph::new(format!(
        " paintflash | {} active | profiling {} | autoplay {}",
        app.overlay.snapshot().len(),
        if app.profiler.is_enabled() { "on" } else { "paused" },
        if app.autoplay { "on" } else { "off" },
    ))
    .style(
        Style::default()
            .fg(theme::solid(ThemeToken::TextPrimary))
            .bg(theme::solid(ThemeToken::Surface)),
    );
    frame.render_widget(header, header_area);

    let content = Area::new(0, 1, area.width, area.height.saturating_sub(2));
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::solid(ThemeToken::Background))),
        content,
    );

    for (i, component) in app.demo.components().iter().enumerate() {
        let area = component.area.intersection(content);
        if area.is_empty() {
            continue;
        }
        let title = if i < app.demo.root_count() {
            format!(" {} {} ", i + 1, component.name)
        } else {
            format!(" {} ", component.name)
        };
        let stats = app
            .profiler
            .stats(component.name)
            .map(|s| {
                format!(
                    "{}x  mean {:.1}ms  worst {:.1}ms",
                    s.renders,
                    s.mean().as_secs_f64() * 1000.0,
                    s.slowest.as_secs_f64() * 1000.0
                )
            })
            .unwrap_or_default();
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(theme::solid(ThemeToken::ComponentBorder)))
            .style(
                Style::default()
                    .fg(theme::solid(ThemeToken::TextMuted))
                    .bg(theme::solid(ThemeToken::ComponentFill)),
            );
        frame.render_widget(Paragraph::new(Line::from(stats)).block(block), area);
    }

    draw_overlay(frame, commands, content);

    let status_area = Area::new(0, area.height.saturating_sub(1), area.width, 1);
    let status = Paragraph::new(format!(
        " {} | space burst  1-9 render  a autoplay  p pause  c clear  r reset  s svg  q quit",
        app.status
    ))
    .style(
        Style::default()
            .fg(theme::solid(ThemeToken::TextMuted))
            .bg(theme::solid(ThemeToken::Surface)),
    );
    frame.render_widget(status, status_area);
}

fn draw_overlay(frame: &mut Frame, commands: &[RenderCommand], bounds: Area) {
    for cmd in commands {
        let RenderCommand::DrawRect {
            rect,
            fill,
            outline,
            label,
            opacity,
            ..
        } = cmd
        else {
            continue;
        };

        let Some(area) = to_area(rect, bounds) else {
            warn!(?rect, "highlight outside the terminal");
            continue;
        };

        if let Some(fill) = fill {
            let bg = theme::tint(*fill, ThemeToken::ComponentFill, *opacity);
            let inner = area.inner(ratatui::layout::Margin::new(1, 1));
            let buf = frame.buffer_mut();
            for y in inner.top()..inner.bottom() {
                for x in inner.left()..inner.right() {
                    buf[(x, y)].set_bg(bg);
                }
            }
        }

        if let Some(outline) = outline {
            let mut block = Block::bordered().border_style(
                Style::default().fg(theme::faded(*outline, ThemeToken::ComponentFill, *opacity)),
            );
            if let Some(label) = label {
                block = block.title(Line::styled(
                    format!(" {label} "),
                    Style::default().fg(theme::faded(
                        ThemeToken::HighlightLabelText,
                        ThemeToken::ComponentFill,
                        *opacity,
                    )),
                ));
            }
            frame.render_widget(block, area);
        }
    }
}

/// Highlight rects are already in cell units.
fn to_area(rect: &paintflash_protocol::Rect, bounds: Area) -> Option<Area> {
    let clamp = |v: f64| v.round().clamp(0.0, f64::from(u16::MAX)) as u16;
    let area = Area::new(clamp(rect.x), clamp(rect.y), clamp(rect.w), clamp(rect.h))
        .intersection(bounds);
    (!area.is_empty()).then_some(area)
}
