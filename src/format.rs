//! Plain-text board and rules files.
//!
//! A board file is `<width> <height>` followed by one `<col> <row>` pair per
//! live cell, all whitespace separated. A rules file holds nine survive flags
//! and nine create flags (see [`RuleTable`]'s `FromStr`).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};

use crate::board::Board;
use crate::error::{BlifsError, Result};
use crate::rules::RuleTable;

pub const BOARD_HELP: &str = "\
(Board file help)
A board file is a space-delimited plain text file with the format (without the underscores):
________________________________
<width of grid> <height of grid>
<col> <row>
<col> <row>
...
<col> <row>
________________________________
Each (<col> <row>) pair defines a live cell in the grid.
";

pub const RULES_HELP: &str = "\
(Rule file help)
A rule file is a space-delimited plain text file with the format (without the underscores):
___________________________________
<0> <1> <2> <3> <4> <5> <6> <7> <8>
<0> <1> <2> <3> <4> <5> <6> <7> <8>
___________________________________
Each of the numbers can either be 0 or 1 in the file. Each line has exactly 9 numbers.
The first line corresponds to which number of neighbors is needed for a live cell to live (1) or die (0).
The second line corresponds to which number of neighbors is needed for a dead cell to become live (1) or remain dead (0).
A single rulestring line such as B3/S23 is accepted as well.
";

/// Reads a board file.
///
/// # Errors
///
/// * [`BlifsError::MalformedBoardFile`] for a missing header, a token that
///   is not a non-negative integer, a coordinate outside the declared size,
///   or a column without its row
/// * [`BlifsError::AllocationError`] for a zero-sized header
/// * [`BlifsError::Io`] if reading fails
pub fn read_board<R: BufRead>(reader: R) -> Result<Board> {
    let mut tokens = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let value = token
                .parse::<usize>()
                .map_err(|_| BlifsError::MalformedBoardFile {
                    line: line_no + 1,
                    reason: format!("'{token}' is not a non-negative integer"),
                })?;
            tokens.push((line_no + 1, value));
        }
    }

    let mut tokens = tokens.into_iter();
    let (width, height) = match (tokens.next(), tokens.next()) {
        (Some((_, w)), Some((_, h))) => (w, h),
        (first, _) => {
            return Err(BlifsError::MalformedBoardFile {
                line: first.map_or(1, |(line, _)| line),
                reason: "missing <width> <height> header".to_string(),
            })
        }
    };

    let mut board = Board::new(width, height)?;
    let mut duplicates = 0;
    while let Some((line, col)) = tokens.next() {
        let Some((line, row)) = tokens.next() else {
            return Err(BlifsError::MalformedBoardFile {
                line,
                reason: format!("column {col} has no row"),
            });
        };
        if col >= width || row >= height {
            return Err(BlifsError::MalformedBoardFile {
                line,
                reason: format!("cell ({col}, {row}) is outside the {width}x{height} board"),
            });
        }
        if board.get(col, row)? {
            duplicates += 1;
        }
        board.set(col, row, true)?;
    }

    if duplicates > 0 {
        warn!("board file lists {duplicates} live cell(s) more than once");
    }
    Ok(board)
}

/// Writes a board in the board-file format, live cells in column-major order.
pub fn write_board<W: Write>(board: &Board, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{} {}", board.width(), board.height())?;
    for (x, y) in board.live_cells() {
        writeln!(writer, "{x} {y}")?;
    }
    writer.flush()
}

/// Reads a rules file.
pub fn read_rules<R: Read>(mut reader: R) -> Result<RuleTable> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    text.parse()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| BlifsError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a board file from disk.
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board> {
    let path = path.as_ref();
    let board = read_board(BufReader::new(open(path)?))?;
    info!(
        "loaded {}x{} board with {} live cells from {}",
        board.width(),
        board.height(),
        board.live_count(),
        path.display()
    );
    Ok(board)
}

/// Loads a rules file from disk.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RuleTable> {
    let path = path.as_ref();
    let rules = read_rules(open(path)?)?;
    info!("loaded rules {rules} from {}", path.display());
    Ok(rules)
}

/// Writes a board file to disk, replacing any existing file.
pub fn save_board<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| BlifsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_board(board, BufWriter::new(file))?;
    info!(
        "saved {} live cells to {}",
        board.live_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Board> {
        read_board(text.as_bytes())
    }

    #[test]
    fn reads_board() {
        let board = parse("5 4\n0 0\n4 3\n2 1\n").unwrap();
        assert_eq!((board.width(), board.height()), (5, 4));
        assert_eq!(board.live_count(), 3);
        assert!(board.get(4, 3).unwrap());
        assert!(board.get(2, 1).unwrap());
    }

    #[test]
    fn layout_is_free_form() {
        let board = parse("  3\n3 1 1\n\n2   0").unwrap();
        assert_eq!(board.live_cells().collect::<Vec<_>>(), vec![(1, 1), (2, 0)]);
    }

    #[test]
    fn header_only_board_is_empty() {
        let board = parse("7 2\n").unwrap();
        assert_eq!(board.live_count(), 0);
    }

    #[test]
    fn duplicate_cells_count_once() {
        let board = parse("3 3\n1 1\n1 1\n").unwrap();
        assert_eq!(board.live_count(), 1);
    }

    #[test]
    fn out_of_bounds_cell_is_malformed() {
        let err = parse("3 3\n1 1\n3 0\n").unwrap_err();
        assert!(matches!(err, BlifsError::MalformedBoardFile { line: 3, .. }));
        let err = parse("3 3\n0 3\n").unwrap_err();
        assert!(matches!(err, BlifsError::MalformedBoardFile { line: 2, .. }));
    }

    #[test]
    fn bad_tokens_are_malformed() {
        assert!(matches!(
            parse("3 3\n-1 0\n"),
            Err(BlifsError::MalformedBoardFile { line: 2, .. })
        ));
        assert!(matches!(
            parse("3 x\n"),
            Err(BlifsError::MalformedBoardFile { line: 1, .. })
        ));
    }

    #[test]
    fn missing_header_or_row_is_malformed() {
        assert!(matches!(parse(""), Err(BlifsError::MalformedBoardFile { .. })));
        assert!(matches!(parse("4"), Err(BlifsError::MalformedBoardFile { .. })));
        assert!(matches!(
            parse("4 4\n1 1\n2\n"),
            Err(BlifsError::MalformedBoardFile { line: 3, .. })
        ));
    }

    #[test]
    fn zero_sized_header_is_an_allocation_error() {
        assert!(matches!(
            parse("0 4\n"),
            Err(BlifsError::AllocationError { .. })
        ));
    }

    #[test]
    fn writes_column_major() {
        let board = parse("3 2\n2 0\n0 1\n0 0\n").unwrap();
        let mut out = Vec::new();
        write_board(&board, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 2\n0 0\n0 1\n2 0\n");
    }

    #[test]
    fn reads_rules() {
        let rules = read_rules("0 0 1 1 0 0 0 0 0\n0 0 0 1 0 0 0 0 0\n".as_bytes()).unwrap();
        assert_eq!(rules, RuleTable::conway());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_board("/nonexistent/board.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/board.txt"));
    }
}
