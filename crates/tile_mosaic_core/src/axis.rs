use serde::{Deserialize, Serialize};

/// One of the five axes of a volume, ordered `[t][c][z][y][x]` from outermost to innermost.
///
/// Viewers treat most axes as spatial or temporal sliders, but the channel axis selects between
/// overlaid images, so handoff interfaces identify it explicitly.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Axis5 {
    T = 0,
    C = 1,
    Z = 2,
    Y = 3,
    X = 4,
}

impl Axis5 {
    /// The index for a shape's component on this axis.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
