//! Console output.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::board::Board;
use crate::driver::{Control, Observer, Progress};
use crate::error::Result;
use crate::random::RandomSpec;

/// Characters used to draw cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fill: char,
    pub empty: char,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            fill: '0',
            empty: '.',
        }
    }
}

/// How much of a run is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Nothing at all.
    None,
    /// The loaded board and the final one.
    #[default]
    Summary,
    /// Every generation.
    Verbose,
    /// The full-screen terminal viewer.
    Tui,
}

/// Draws `board` one text line per row.
pub fn render_board(board: &Board, style: &Style) -> String {
    let mut text = String::with_capacity((board.width() + 1) * board.height());
    for row in board.rows() {
        text.extend(row.iter().map(|&alive| if alive { style.fill } else { style.empty }));
        text.push('\n');
    }
    text
}

/// Prints a run to a console.
///
/// Also handles the inter-generation delay and, in interactive mode, waits
/// for a line on `input` before every generation.
pub struct ConsoleObserver<W, R> {
    out: W,
    input: Option<R>,
    mode: DisplayMode,
    style: Style,
    delay: Option<Duration>,
}

impl<W: Write, R: BufRead> ConsoleObserver<W, R> {
    pub fn new(out: W, mode: DisplayMode, style: Style) -> Self {
        ConsoleObserver {
            out,
            input: None,
            mode,
            style,
            delay: None,
        }
    }

    /// Waits for a line on `input` before each generation.
    pub fn interactive(mut self, input: R) -> Self {
        self.input = Some(input);
        self
    }

    /// Sleeps for `delay` after every generation but the last.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn shows_every_generation(&self) -> bool {
        self.mode == DisplayMode::Verbose
    }

    fn shows_anything(&self) -> bool {
        matches!(self.mode, DisplayMode::Summary | DisplayMode::Verbose)
    }

    fn print_board(&mut self, board: &Board) -> Result<()> {
        let text = render_board(board, &self.style);
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Prints a board that was just read from a file.
    pub fn show_loaded(&mut self, board: &Board) -> Result<()> {
        if !self.shows_anything() {
            return Ok(());
        }
        self.print_board(board)?;
        writeln!(
            self.out,
            "[READ ({}*{}) BOARD, ALIVE: {}/{}]",
            board.width(),
            board.height(),
            board.live_count(),
            board.area()
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Prints the result of random generation; the board itself only in
    /// verbose mode.
    pub fn show_generated(&mut self, board: &Board, spec: &RandomSpec) -> Result<()> {
        if !self.shows_anything() {
            return Ok(());
        }
        if self.shows_every_generation() {
            self.print_board(board)?;
        }
        let fill = board.live_count() as f64 / board.area() as f64 * 100.0;
        writeln!(
            self.out,
            "[ACTUAL LIVE: {:.2}%, LIFE PROBABILITY: {:.2}% ({}*{})]",
            fill,
            spec.probability() * 100.0,
            board.width(),
            board.height()
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write, R: BufRead> Observer for ConsoleObserver<W, R> {
    fn before_generation(&mut self, _progress: Progress<'_>) -> Result<Control> {
        if let Some(input) = self.input.as_mut() {
            let mut line = String::new();
            input.read_line(&mut line)?;
        }
        Ok(Control::Continue)
    }

    fn on_generation(&mut self, progress: Progress<'_>) -> Result<()> {
        if self.shows_every_generation() || (self.shows_anything() && progress.is_last()) {
            let board = progress.board;
            self.print_board(board)?;
            writeln!(
                self.out,
                "[GEN {}/{}, ALIVE: {}/{} ({}*{})]",
                progress.stats.generation,
                progress.target,
                board.live_count(),
                board.area(),
                board.width(),
                board.height()
            )?;
            self.out.flush()?;
        }

        if let Some(delay) = self.delay {
            if !progress.is_last() {
                thread::sleep(delay);
            }
        }
        Ok(())
    }

    /// Shown in summary mode too, whichever generation the run stops at.
    fn on_static(&mut self, progress: Progress<'_>) -> Result<()> {
        if self.shows_anything() {
            self.print_board(progress.board)?;
            writeln!(self.out, "[BOARD IS STATIC]")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Simulation;
    use crate::rules::RuleTable;
    use std::io::Empty;
    use std::time::Instant;

    fn blinker() -> Board {
        let mut board = Board::new(5, 5).unwrap();
        for x in 1..=3 {
            board.set(x, 2, true).unwrap();
        }
        board
    }

    fn run_with(mode: DisplayMode, board: Board, iterations: u64) -> String {
        let mut observer: ConsoleObserver<Vec<u8>, Empty> =
            ConsoleObserver::new(Vec::new(), mode, Style::default());
        observer.show_loaded(&board).unwrap();
        let mut sim = Simulation::new(board, Some(RuleTable::conway()));
        sim.run(iterations, &mut observer).unwrap();
        String::from_utf8(observer.into_inner()).unwrap()
    }

    #[test]
    fn renders_rows_with_style() {
        let text = render_board(&blinker(), &Style { fill: '#', empty: ' ' });
        assert_eq!(text, "     \n     \n ### \n     \n     \n");
    }

    #[test]
    fn summary_prints_first_and_last() {
        let out = run_with(DisplayMode::Summary, blinker(), 3);
        assert_eq!(
            out,
            ".....\n.....\n.000.\n.....\n.....\n\
             [READ (5*5) BOARD, ALIVE: 3/25]\n\
             .....\n..0..\n..0..\n..0..\n.....\n\
             [GEN 3/3, ALIVE: 3/25 (5*5)]\n"
        );
    }

    #[test]
    fn verbose_prints_every_generation() {
        let out = run_with(DisplayMode::Verbose, blinker(), 3);
        assert_eq!(out.matches("[GEN ").count(), 3);
        assert!(out.contains("[GEN 1/3, ALIVE: 3/25 (5*5)]"));
    }

    #[test]
    fn none_prints_nothing() {
        assert!(run_with(DisplayMode::None, blinker(), 3).is_empty());
    }

    #[test]
    fn static_board_is_announced() {
        let mut lone = Board::new(3, 3).unwrap();
        lone.set(1, 1, true).unwrap();
        let out = run_with(DisplayMode::Summary, lone, 5);
        assert!(out.ends_with("...\n...\n...\n[BOARD IS STATIC]\n"));
    }

    fn timed_run(board: Board, iterations: u64, delay: Duration) -> Duration {
        let mut observer: ConsoleObserver<Vec<u8>, Empty> =
            ConsoleObserver::new(Vec::new(), DisplayMode::None, Style::default()).with_delay(delay);
        let mut sim = Simulation::new(board, Some(RuleTable::conway()));
        let start = Instant::now();
        sim.run(iterations, &mut observer).unwrap();
        start.elapsed()
    }

    #[test]
    fn delay_sleeps_between_generations_only() {
        let delay = Duration::from_millis(150);

        // Three generations sleep twice, never after the last
        let elapsed = timed_run(blinker(), 3, delay);
        assert!(elapsed >= 2 * delay, "slept {elapsed:?}");

        let elapsed = timed_run(blinker(), 1, delay);
        assert!(elapsed < delay, "slept {elapsed:?} after the last generation");
    }

    #[test]
    fn delay_is_skipped_on_stasis() {
        let mut lone = Board::new(3, 3).unwrap();
        lone.set(1, 1, true).unwrap();
        let delay = Duration::from_millis(150);
        let elapsed = timed_run(lone, 5, delay);
        assert!(elapsed < delay, "slept {elapsed:?} on a static board");
    }

    #[test]
    fn interactive_mode_consumes_a_line_per_generation() {
        let input: &[u8] = b"\n\n\nleftover\n";
        let mut observer =
            ConsoleObserver::new(Vec::new(), DisplayMode::None, Style::default()).interactive(input);
        let mut sim = Simulation::new(blinker(), Some(RuleTable::conway()));
        sim.run(3, &mut observer).unwrap();
        assert_eq!(observer.input, Some(&b"leftover\n"[..]));
    }

    #[test]
    fn generated_summary_reports_fill() {
        let spec: RandomSpec = "5:5:4".parse().unwrap();
        let mut observer: ConsoleObserver<Vec<u8>, Empty> =
            ConsoleObserver::new(Vec::new(), DisplayMode::Summary, Style::default());
        observer.show_generated(&blinker(), &spec).unwrap();
        let out = String::from_utf8(observer.into_inner()).unwrap();
        assert_eq!(out, "[ACTUAL LIVE: 12.00%, LIFE PROBABILITY: 25.00% (5*5)]\n");
    }
}
