//! Full-screen terminal viewer built on `ratatui` and `crossterm`.
//!
//! ## Controls
//!
//! * Space: Play/Pause the simulation
//! * Enter: Step forward one generation (when paused)
//! * q: Quit

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style as TextStyle},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use sysinfo::{System, SystemExt};

use crate::driver::{Control, Observer, Outcome, Progress, Stats};
use crate::error::Result;
use crate::render::{render_board, Style};

/// Tick used when no delay is configured.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// What the viewer reports in its status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Paused,
    Finished(Outcome),
}

/// Drives a run from the keyboard and draws every generation.
pub struct TuiObserver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Board drawing characters
    style: Style,
    /// Title shown above the grid, usually the rulestring
    title: String,
    tick_rate: Duration,
    last_tick: Instant,
    status: Status,
    /// System information for resource monitoring
    sys: System,
    restored: bool,
}

impl TuiObserver {
    /// Switches the terminal to the alternate screen in raw mode.
    ///
    /// # Arguments
    ///
    /// * `title` - Shown in the grid's border
    /// * `style` - Cell characters
    /// * `delay` - Time between generations while playing; zero uses [`DEFAULT_TICK`]
    /// * `paused` - Start paused, advancing only on Enter
    ///
    /// # Errors
    ///
    /// Returns an error if terminal manipulation fails.
    pub fn new(title: String, style: Style, delay: Duration, paused: bool) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut sys = System::new();
        sys.refresh_memory();

        Ok(TuiObserver {
            terminal,
            style,
            title,
            tick_rate: if delay.is_zero() { DEFAULT_TICK } else { delay },
            last_tick: Instant::now(),
            status: if paused { Status::Paused } else { Status::Running },
            sys,
            restored: false,
        })
    }

    /// Leaves the alternate screen and gives the terminal back.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn draw(&mut self, progress: Progress<'_>) -> Result<()> {
        let grid = render_board(progress.board, &self.style);
        let title = format!(
            "{} [Space: Play/Pause | Enter: Step | q: Quit]",
            self.title
        );
        let stats_text = stats_text(progress, self.status, &self.sys);

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            draw_grid(f, grid, title, chunks[0]);
            draw_stats(f, stats_text, chunks[1]);
        })?;
        Ok(())
    }

    /// Waits for the next key press, up to `timeout`.
    fn next_key(timeout: Duration) -> Result<Option<KeyCode>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key.code));
                }
            }
        }
        Ok(None)
    }
}

impl Observer for TuiObserver {
    fn before_generation(&mut self, progress: Progress<'_>) -> Result<Control> {
        loop {
            self.draw(progress)?;

            let timeout = self
                .tick_rate
                .checked_sub(self.last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            match Self::next_key(timeout)? {
                Some(KeyCode::Char('q')) => return Ok(Control::Stop),
                Some(KeyCode::Char(' ')) => {
                    self.status = match self.status {
                        Status::Running => Status::Paused,
                        _ => Status::Running,
                    };
                }
                Some(KeyCode::Enter) if self.status == Status::Paused => {
                    return Ok(Control::Continue);
                }
                _ => {}
            }

            if self.last_tick.elapsed() >= self.tick_rate {
                self.last_tick = Instant::now();
                if self.status == Status::Running {
                    return Ok(Control::Continue);
                }
            }
        }
    }

    fn on_generation(&mut self, _progress: Progress<'_>) -> Result<()> {
        self.sys.refresh_memory();
        Ok(())
    }

    /// Shows the final board until `q` is pressed, unless the user already
    /// quit.
    fn on_finish(&mut self, progress: Progress<'_>, outcome: Outcome) -> Result<()> {
        self.status = Status::Finished(outcome);
        if !matches!(outcome, Outcome::Interrupted { .. }) {
            loop {
                self.draw(progress)?;
                if let Some(KeyCode::Char('q')) = Self::next_key(DEFAULT_TICK)? {
                    break;
                }
            }
        }
        self.restore()
    }
}

impl Drop for TuiObserver {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

/// Formats the statistics panel.
fn stats_text(progress: Progress<'_>, status: Status, sys: &System) -> String {
    let memory_used = sys.used_memory() / 1024; // Convert to KB
    let memory_total = sys.total_memory() / 1024;
    let stats: &Stats = progress.stats;
    let board = progress.board;

    let status = match status {
        Status::Running => "Running".to_string(),
        Status::Paused => "Paused".to_string(),
        Status::Finished(Outcome::Exhausted { .. }) => "Done (press q)".to_string(),
        Status::Finished(Outcome::Static { .. }) => "Static (press q)".to_string(),
        Status::Finished(Outcome::Interrupted { generations }) => {
            format!("Stopped after {generations}")
        }
    };

    format!(
        "Statistics:\n\
        Generation: {}/{}\n\
        Current Population: {}/{}\n\
        Cells Created: {}\n\
        Cells Destroyed: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Board: {}*{}\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Status: {}\n",
        stats.generation,
        progress.target,
        stats.current_population,
        board.area(),
        stats.cells_created,
        stats.cells_destroyed,
        stats.birth_rate(),
        stats.death_rate(),
        board.width(),
        board.height(),
        memory_used,
        memory_total as f64 / 1024.0,
        status
    )
}

/// Draws the game grid to the terminal interface.
fn draw_grid(f: &mut ratatui::Frame, cells: String, title: String, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(title);

    let paragraph = Paragraph::new(cells)
        .style(TextStyle::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Draws the statistics panel to the terminal interface.
fn draw_stats(f: &mut ratatui::Frame, text: String, area: Rect) {
    let stats_widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}
