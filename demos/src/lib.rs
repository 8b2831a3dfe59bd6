//! Canned scenes for the voxnav terminal demo.
//!
//! Each scene is a layout plus the agent that should cross it. [`run`]
//! parses the layout and searches from `S` to `E`; [`overlay`] turns the
//! result into per-level rows of [`Mark`]s for drawing.

use std::fmt;

use rand::Rng;
use voxnav_core::{Aabb, BlockPos};
use voxnav_paths::{Action, AgentKind, PathFinder, PathNode, PathRequest, SearchOutcome};
use voxnav_world::{Layout, LayoutError, Legend};

pub struct Scene {
    pub name: &'static str,
    pub about: &'static str,
    pub layout: &'static str,
    pub agent: AgentKind,
    pub max_fall: i32,
}

pub const SCENES: &[Scene] = &[
    Scene {
        name: "courtyard",
        about: "a two-high wall with a slab ramp, a fence and a pond",
        layout: COURTYARD,
        agent: AgentKind::Default,
        max_fall: 3,
    },
    Scene {
        name: "stairs",
        about: "one-block steps up to a landing",
        layout: STAIRS,
        agent: AgentKind::Default,
        max_fall: 3,
    },
    Scene {
        name: "river",
        about: "a channel that has to be swum",
        layout: RIVER,
        agent: AgentKind::Default,
        max_fall: 3,
    },
    Scene {
        name: "lava",
        about: "a lava moat only a heat-proof agent crosses",
        layout: LAVA,
        agent: AgentKind::HeatProof,
        max_fall: 3,
    },
    Scene {
        name: "cliff",
        about: "a four-block drop, too high for the default fall limit",
        layout: CLIFF,
        agent: AgentKind::Default,
        max_fall: 3,
    },
];

const COURTYARD: &str = "\
--- y=0
############
############
############
############
############
############
--- y=1
S....#......
.....#..~~..
..\"..#..~~..
.....|......
.....__.....
.....#.....E
--- y=2
.....#......
.....#......
.....#......
.....#......
............
.....#......
";

const STAIRS: &str = "\
--- y=0
######
--- y=1
S..###
--- y=2
....##
--- y=3
.....#
--- y=4
.....E
";

const RIVER: &str = "\
--- y=0
##~~~~##
##~~~~##
--- y=1
S.......
.......E
";

const LAVA: &str = "\
--- y=0
###^^###
###^^###
--- y=1
S.......
.......E
";

const CLIFF: &str = "\
--- y=0
######
--- y=1
.....E
--- y=4
##....
--- y=5
S.....
";

pub fn scene(name: &str) -> Option<&'static Scene> {
    SCENES.iter().find(|s| s.name == name)
}

/// Result of running a scene.
pub struct Run {
    pub layout: Layout,
    pub path: Option<Vec<PathNode>>,
    pub outcome: SearchOutcome,
    pub nodes_checked: usize,
}

/// Parse the scene and search from its start marker to its end marker.
pub fn run<R: Rng>(scene: &Scene, rng: R) -> Result<Run, DemoError> {
    let mut layout = Layout::parse(scene.layout)?;
    let start = layout.start.ok_or(DemoError::MissingMarker(Legend::START))?;
    let end = layout.end.ok_or(DemoError::MissingMarker(Legend::END))?;
    let req = PathRequest::new(start, end, scene.max_fall, 1.01, Aabb::centered(0.6, 1.8))
        .with_agent(scene.agent);

    let mut pf = PathFinder::new(rng);
    let path = pf.find_path(&mut layout.world, &req);
    Ok(Run {
        layout,
        path,
        outcome: pf.outcome(),
        nodes_checked: pf.nodes_checked(),
    })
}

/// What to draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Terrain(char),
    Start,
    End,
    Step(Action),
}

/// One horizontal slice of the scene, rows indexed by `z`.
pub struct Level {
    pub y: i32,
    pub rows: Vec<Vec<Mark>>,
}

/// Lay the path over the layout, one [`Level`] per slice height from the
/// highest down to the lowest.
pub fn overlay(run: &Run) -> Vec<Level> {
    let legend = Legend::standard();
    let steps = run.path.as_deref().unwrap_or_default();
    let (lo, hi) = run
        .layout
        .levels
        .iter()
        .copied()
        .chain(steps.iter().map(|n| n.pos.y))
        .fold((i32::MAX, i32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));

    let (w, d) = run.layout.size;
    (lo..=hi)
        .rev()
        .map(|y| {
            let rows = (0..d)
                .map(|z| {
                    (0..w)
                        .map(|x| mark_at(run, &legend, steps, BlockPos::new(x, y, z)))
                        .collect::<Vec<_>>()
                })
                .collect();
            Level { y, rows }
        })
        .collect()
}

fn mark_at(run: &Run, legend: &Legend, steps: &[PathNode], pos: BlockPos) -> Mark {
    let layout = &run.layout;
    if layout.start == Some(pos) {
        return Mark::Start;
    }
    if layout.end == Some(pos) {
        return Mark::End;
    }
    if let Some(n) = steps.iter().find(|n| n.pos == pos) {
        return Mark::Step(n.action);
    }
    let world = &layout.world;
    Mark::Terrain(
        legend
            .glyph_for(world.solid(pos), world.fluid(pos))
            .unwrap_or('?'),
    )
}

#[derive(Debug)]
pub enum DemoError {
    Layout(LayoutError),
    MissingMarker(char),
}

impl From<LayoutError> for DemoError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => err.fmt(f),
            Self::MissingMarker(ch) => write!(f, "layout has no \u{201c}{ch}\u{201d} marker"),
        }
    }
}

impl std::error::Error for DemoError {}
