//! Terminal demo: find a path through a canned scene and draw it slice by
//! slice.
//!
//! Run: cargo run --bin voxnav-demo [scene]
//! List scenes: cargo run --bin voxnav-demo -- --list

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Print, PrintStyledContent, StyledContent, Stylize},
};
use voxnav_demo::{Level, Mark, Run, SCENES, overlay, run, scene};
use voxnav_paths::Action;

fn styled(mark: Mark) -> StyledContent<char> {
    match mark {
        Mark::Start => 'S'.black().on_green(),
        Mark::End => 'E'.black().on_red(),
        Mark::Step(Action::Walk) => '*'.cyan().bold(),
        Mark::Step(Action::Climb) => '/'.cyan().bold(),
        Mark::Step(Action::Fall) => '\\'.cyan().bold(),
        Mark::Step(Action::Swim) => '%'.cyan().bold(),
        Mark::Terrain(ch) => match ch {
            '.' => ch.dark_grey(),
            '#' | '_' => ch.grey(),
            'd' => ch.dark_yellow(),
            '|' => ch.yellow(),
            '~' => ch.blue(),
            '^' => ch.red(),
            '=' => ch.white(),
            '"' => ch.green(),
            _ => ch.magenta(),
        },
    }
}

fn draw_level(out: &mut impl Write, level: &Level) -> io::Result<()> {
    queue!(out, Print(format!("y={}\n", level.y)))?;
    for row in &level.rows {
        for &mark in row {
            queue!(out, PrintStyledContent(styled(mark)))?;
        }
        queue!(out, Print("\n"))?;
    }
    Ok(())
}

fn draw(out: &mut impl Write, name: &str, r: &Run) -> io::Result<()> {
    for level in overlay(r) {
        draw_level(out, &level)?;
    }
    let summary = match &r.path {
        Some(path) => format!(
            "{name}: {} steps, cost {:.2}, {} nodes checked\n",
            path.len(),
            path.last().map_or(0.0, |n| n.g),
            r.nodes_checked
        ),
        None => format!(
            "{name}: no path ({:?}), {} nodes checked\n",
            r.outcome, r.nodes_checked
        ),
    };
    queue!(out, Print(summary))?;
    out.flush()
}

fn main() {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--list") {
        for s in SCENES {
            println!("{:<10} {}", s.name, s.about);
        }
        return;
    }

    let name = arg.as_deref().unwrap_or("courtyard");
    let Some(sc) = scene(name) else {
        eprintln!("unknown scene {name:?}; try --list");
        std::process::exit(2);
    };

    let result = run(sc, rand::rng())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        .and_then(|r| draw(&mut io::stdout(), sc.name, &r));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
