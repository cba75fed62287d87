//! Center Cuts
//!
//! A truncated cube sliced through its center along every diagonal. Each of
//! the eight corner keys turns the matching half of the puzzle by 120
//! degrees; the committed state stays exact across any number of turns.
//! Includes an interactive 3D viewer and headless text modes.

mod visualization;

use clap::{Parser, Subcommand, ValueEnum};

use centercuts::engine::{ParseActionError, ANIMATION_DURATION_MS};
use centercuts::{build_pieces, format_layout, Action, CrossSections, PuzzleConfig, PuzzleEngine};

/// Turns a center-cut truncated-cube puzzle and visualizes it.
#[derive(Parser)]
#[command(name = "centercuts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Whether the hexagonal cross-section faces are present, and whether
    /// they turn with their half.
    #[arg(long, value_enum, default_value = "omit")]
    cross_sections: CrossSectionsArg,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CrossSectionsArg {
    Omit,
    Rotating,
    Locked,
}

impl From<CrossSectionsArg> for CrossSections {
    fn from(arg: CrossSectionsArg) -> Self {
        match arg {
            CrossSectionsArg::Omit => CrossSections::Omit,
            CrossSectionsArg::Rotating => CrossSections::Rotating,
            CrossSectionsArg::Locked => CrossSections::Locked,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive viewer (the default).
    Display,
    /// Print the piece layout as text.
    Layout,
    /// Apply a sequence of turns headlessly, then print the layout.
    Twist {
        /// Comma or space separated sign triples, e.g. "+++ --+".
        moves: String,
    },
}

/// Parses and commits each move in order.
fn apply_moves(engine: &mut PuzzleEngine, moves: &str) -> Result<(), ParseActionError> {
    for token in moves.split([',', ' ']).filter(|t| !t.is_empty()) {
        let action: Action = token.parse()?;
        if engine.on_action_key(action) {
            engine.tick(ANIMATION_DURATION_MS + 1.0);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = PuzzleConfig {
        cross_sections: cli.cross_sections.into(),
        ..PuzzleConfig::default()
    };
    let pieces = match build_pieces(&config) {
        Ok(pieces) => pieces,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let mut engine = PuzzleEngine::new(pieces);

    match cli.command {
        None | Some(Command::Display) => {
            println!("Controls: WASD/Q/E rotate the camera, H/J/K/L/Y/U/I/O turn a half");
            visualization::display(engine);
        }
        Some(Command::Layout) => println!("{}", format_layout(engine.pieces())),
        Some(Command::Twist { moves }) => {
            if let Err(err) = apply_moves(&mut engine, &moves) {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
            println!("{}", format_layout(engine.pieces()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_for(cross_sections: CrossSections) -> PuzzleEngine {
        let config = PuzzleConfig {
            cross_sections,
            ..PuzzleConfig::default()
        };
        PuzzleEngine::new(build_pieces(&config).unwrap())
    }

    #[test]
    fn test_initial_layout() {
        let engine = engine_for(CrossSections::Omit);
        insta::assert_snapshot!(format_layout(engine.pieces()), @r"
        cap00+   00+  Cyan/4 Silver/4 Coral/4 Green/4 White/4
        cap0-0   0-0  Violet/4 White/4 Green/4 Magenta/4 Orange/4
        cap00-   00-  LightRed/4 Orange/4 Magenta/4 Yellow/4 Blue/4
        cap0+0   0+0  BlueViolet/4 Blue/4 Yellow/4 Coral/4 Silver/4
        cap+00   +00  Teal/4 Blue/4 Silver/4 White/4 Orange/4
        cap-00   -00  SkyBlue/4 Coral/4 Yellow/4 Magenta/4 Green/4
        tip+++   +++  Silver/3
        tip-++   -++  Coral/3
        tip+--   +--  Orange/3
        tip---   ---  Magenta/3
        ");
    }

    #[test]
    fn test_layout_after_one_diagonal_turn() {
        let mut engine = engine_for(CrossSections::Omit);
        apply_moves(&mut engine, "+++").unwrap();
        insta::assert_snapshot!(format_layout(engine.pieces()), @r"
        cap00+   +00  Cyan/4 Silver/4 Coral/4 Green/4 White/4
        cap0+0   00+  BlueViolet/4 Blue/4 Yellow/4 Coral/4 Silver/4
        cap+00   0+0  Teal/4 Blue/4 Silver/4 White/4 Orange/4
        tip+++   +++  Silver/3
        tip-++   +-+  Coral/3
        cap0-0   0-0  Violet/4 White/4 Green/4 Magenta/4 Orange/4
        cap00-   00-  LightRed/4 Orange/4 Magenta/4 Yellow/4 Blue/4
        cap-00   -00  SkyBlue/4 Coral/4 Yellow/4 Magenta/4 Green/4
        tip+--   +--  Orange/3
        tip---   ---  Magenta/3
        ");
    }

    #[test]
    fn test_cross_section_layout_appends_cores() {
        let engine = engine_for(CrossSections::Rotating);
        let layout = format_layout(engine.pieces());
        let lines: Vec<&str> = layout.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[10].starts_with("core+++"));
        assert!(lines[11].starts_with("core---"));
        assert!(lines[10].contains("LightGreen/6"));
    }

    #[test]
    fn test_three_turns_of_one_diagonal_cancel() {
        let mut engine = engine_for(CrossSections::Omit);
        let initial = format_layout(engine.pieces());
        apply_moves(&mut engine, "--+, --+, --+").unwrap();
        // three turns of the same diagonal are the identity, but the piece
        // list order reflects the last partition
        let after = format_layout(engine.pieces());
        let mut lines: Vec<&str> = after.lines().collect();
        let mut expected: Vec<&str> = initial.lines().collect();
        lines.sort_unstable();
        expected.sort_unstable();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_bad_move_string_is_rejected() {
        let mut engine = engine_for(CrossSections::Omit);
        assert!(apply_moves(&mut engine, "+++ ,weird").is_err());
    }
}
