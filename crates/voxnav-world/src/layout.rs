//! Worlds described as stacked ASCII slices.
//!
//! Each slice starts with a `--- y=N` header followed by one row per `z`
//! (top row is `z = 0`) and one column per `x`. All rows of a layout must
//! have the same width and all slices the same depth.
//!
//! ```text
//! --- y=0
//! #####
//! #####
//! --- y=1
//! S..#E
//! ...#.
//! ```

use std::collections::HashMap;
use std::fmt;

use voxnav_core::BlockPos;

use crate::block::{BlockId, BlockRegistry};
use crate::world::VoxelWorld;

/// What a layout character places in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    pub solid: BlockId,
    pub fluid: BlockId,
}

impl Glyph {
    pub const fn solid(id: BlockId) -> Self {
        Self {
            solid: id,
            fluid: BlockId::AIR,
        }
    }

    pub const fn fluid(id: BlockId) -> Self {
        Self {
            solid: BlockId::AIR,
            fluid: id,
        }
    }
}

/// Character to block mapping used when parsing layouts.
#[derive(Debug, Clone)]
pub struct Legend {
    glyphs: HashMap<char, Glyph>,
}

impl Default for Legend {
    fn default() -> Self {
        Self::standard()
    }
}

impl Legend {
    /// Marks the start cell. Placed as air.
    pub const START: char = 'S';
    /// Marks the end cell. Placed as air.
    pub const END: char = 'E';

    /// Glyphs for the built-in blocks of [`BlockRegistry::with_defaults`].
    ///
    /// `.` air, `#` stone, `d` dirt, `_` slab, `|` fence, `~` water,
    /// `^` lava, `=` ice, `"` tall grass.
    pub fn standard() -> Self {
        let glyphs = [
            ('.', Glyph::default()),
            (Self::START, Glyph::default()),
            (Self::END, Glyph::default()),
            ('#', Glyph::solid(BlockId::STONE)),
            ('d', Glyph::solid(BlockId::DIRT)),
            ('_', Glyph::solid(BlockId::SLAB)),
            ('|', Glyph::solid(BlockId::FENCE)),
            ('~', Glyph::fluid(BlockId::WATER)),
            ('^', Glyph::fluid(BlockId::LAVA)),
            ('=', Glyph::fluid(BlockId::ICE)),
            ('"', Glyph::solid(BlockId::TALL_GRASS)),
        ];
        Self {
            glyphs: glyphs.into_iter().collect(),
        }
    }

    pub fn set(&mut self, ch: char, glyph: Glyph) -> &mut Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    pub fn get(&self, ch: char) -> Option<Glyph> {
        self.glyphs.get(&ch).copied()
    }

    /// A character that places `solid`/`fluid`, for rendering. Markers are
    /// never returned.
    pub fn glyph_for(&self, solid: BlockId, fluid: BlockId) -> Option<char> {
        let want = Glyph { solid, fluid };
        self.glyphs
            .iter()
            .filter(|&(&ch, _)| ch != Self::START && ch != Self::END)
            .filter(|&(_, g)| *g == want)
            .map(|(&ch, _)| ch)
            .min()
    }
}

/// A parsed layout: the world plus the marked endpoints.
#[derive(Debug, Clone)]
pub struct Layout {
    pub world: VoxelWorld,
    pub start: Option<BlockPos>,
    pub end: Option<BlockPos>,
    /// Horizontal extent in cells: `(width along x, depth along z)`.
    pub size: (i32, i32),
    /// Slice heights in the order they appear.
    pub levels: Vec<i32>,
}

impl Layout {
    /// Parse with the standard legend and built-in blocks.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        Self::parse_with(s, &Legend::standard(), BlockRegistry::with_defaults())
    }

    /// Parse using a custom legend and block registry.
    pub fn parse_with(
        s: &str,
        legend: &Legend,
        registry: BlockRegistry,
    ) -> Result<Self, LayoutError> {
        let mut layout = Self {
            world: VoxelWorld::new(registry),
            start: None,
            end: None,
            size: (0, 0),
            levels: Vec::new(),
        };
        let mut width: Option<i32> = None;
        let mut depth: Option<i32> = None;
        let mut y: Option<i32> = None;
        let mut z = 0;

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("---") {
                if let Some(y) = y {
                    check_size(&mut depth, z, y)?;
                }
                let level = parse_header(rest).ok_or_else(|| LayoutError::BadHeader {
                    line: lineno + 1,
                    text: line.to_string(),
                })?;
                y = Some(level);
                layout.levels.push(level);
                z = 0;
                continue;
            }
            let Some(level) = y else {
                return Err(LayoutError::MissingHeader { line: lineno + 1 });
            };

            let mut x = 0;
            for ch in line.chars() {
                let pos = BlockPos::new(x, level, z);
                let glyph = legend
                    .get(ch)
                    .ok_or(LayoutError::UnknownGlyph { ch, pos })?;
                layout.world.set_solid(pos, glyph.solid);
                layout.world.set_fluid(pos, glyph.fluid);
                match ch {
                    Legend::START => layout.start = Some(pos),
                    Legend::END => layout.end = Some(pos),
                    _ => {}
                }
                x += 1;
            }
            check_size(&mut width, x, level)?;
            z += 1;
        }

        let Some(level) = y else {
            return Err(LayoutError::Empty);
        };
        check_size(&mut depth, z, level)?;
        layout.size = (width.unwrap_or(0), depth.unwrap_or(0));
        log::debug!(
            "parsed layout {}x{} with {} levels",
            layout.size.0,
            layout.size.1,
            layout.levels.len()
        );
        Ok(layout)
    }

    /// Render the slice at height `y` back to text, one row per `z`.
    /// Endpoint markers take precedence over the cell contents.
    pub fn render_slice(&self, y: i32, legend: &Legend) -> String {
        let (w, d) = self.size;
        let mut out = String::with_capacity(((w + 1) * d) as usize);
        for z in 0..d {
            for x in 0..w {
                let pos = BlockPos::new(x, y, z);
                let ch = if self.start == Some(pos) {
                    Legend::START
                } else if self.end == Some(pos) {
                    Legend::END
                } else {
                    legend
                        .glyph_for(self.world.solid(pos), self.world.fluid(pos))
                        .unwrap_or('?')
                };
                out.push(ch);
            }
            if z + 1 < d {
                out.push('\n');
            }
        }
        out
    }
}

/// Parses the `y=N` part of a slice header.
fn parse_header(rest: &str) -> Option<i32> {
    rest.trim().strip_prefix("y=")?.trim().parse().ok()
}

fn check_size(expected: &mut Option<i32>, got: i32, y: i32) -> Result<(), LayoutError> {
    match *expected {
        Some(n) if n != got => Err(LayoutError::InconsistentSize { y }),
        Some(_) => Ok(()),
        None => {
            *expected = Some(got);
            Ok(())
        }
    }
}

/// Errors produced while parsing a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No slices at all.
    Empty,
    /// Rows before the first `--- y=N` header.
    MissingHeader { line: usize },
    /// A header that does not read `--- y=N`.
    BadHeader { line: usize, text: String },
    /// Rows or slices of differing sizes; `y` is the offending slice.
    InconsistentSize { y: i32 },
    /// A character the legend does not know.
    UnknownGlyph { ch: char, pos: BlockPos },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: no slices"),
            Self::MissingHeader { line } => {
                write!(f, "layout: line {line}: rows before the first slice header")
            }
            Self::BadHeader { line, text } => {
                write!(f, "layout: line {line}: malformed slice header \u{201c}{text}\u{201d}")
            }
            Self::InconsistentSize { y } => write!(f, "layout: inconsistent size in slice y={y}"),
            Self::UnknownGlyph { ch, pos } => {
                write!(f, "layout contains unknown glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
