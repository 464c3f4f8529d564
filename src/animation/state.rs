use std::collections::BTreeMap;

/// Named motion category; each one owns a fixed row of the atlas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AnimationState {
    /// Row 0.
    #[default]
    Idle,
    /// Row 1.
    Run,
    /// Row 2.
    Jump,
    /// Row 3.
    Attack,
}

/// State to atlas row. Exhaustive: adding a state means adding one entry here.
const ROW_TABLE: [(AnimationState, u32); AnimationState::COUNT] = [
    (AnimationState::Idle, 0),
    (AnimationState::Run, 1),
    (AnimationState::Jump, 2),
    (AnimationState::Attack, 3),
];

impl AnimationState {
    /// Number of states.
    pub const COUNT: usize = 4;

    /// Every state in row order.
    pub const ALL: [AnimationState; Self::COUNT] = [
        AnimationState::Idle,
        AnimationState::Run,
        AnimationState::Jump,
        AnimationState::Attack,
    ];

    /// Atlas row holding this state's frames.
    pub fn row(self) -> u32 {
        ROW_TABLE[self.index()].1
    }

    /// Stable tag used in filenames and status lines.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Run => "Run",
            Self::Jump => "Jump",
            Self::Attack => "Attack",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for AnimationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown animation state '{s}'"))
    }
}

/// Manual per-state correction applied to every frame of that state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameOffset {
    /// Horizontal nudge in atlas pixels.
    #[serde(default)]
    pub x: i32,
    /// Vertical nudge in atlas pixels.
    #[serde(default)]
    pub y: i32,
}

impl FrameOffset {
    /// No correction.
    pub const ZERO: FrameOffset = FrameOffset { x: 0, y: 0 };

    /// Build an offset.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

}

/// One [`FrameOffset`] per [`AnimationState`], always fully populated.
///
/// The table is `Copy`: draw and export calls receive a snapshot, so edits made between calls never
/// race with a call in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(
    from = "BTreeMap<AnimationState, FrameOffset>",
    into = "BTreeMap<AnimationState, FrameOffset>"
)]
pub struct OffsetTable {
    entries: [FrameOffset; AnimationState::COUNT],
}

impl OffsetTable {
    /// Offset for `state`.
    pub fn get(&self, state: AnimationState) -> FrameOffset {
        self.entries[state.index()]
    }

    /// Replace the offset for `state`.
    pub fn set(&mut self, state: AnimationState, offset: FrameOffset) {
        self.entries[state.index()] = offset;
    }

    /// Add `(dx, dy)` to the offset for `state` and return the new value.
    pub fn nudge(&mut self, state: AnimationState, dx: i32, dy: i32) -> FrameOffset {
        let e = &mut self.entries[state.index()];
        e.x = e.x.saturating_add(dx);
        e.y = e.y.saturating_add(dy);
        *e
    }

    /// Reset one state back to zero, leaving the others untouched.
    pub fn reset(&mut self, state: AnimationState) {
        self.entries[state.index()] = FrameOffset::ZERO;
    }

    /// Reset every state.
    pub fn reset_all(&mut self) {
        self.entries = [FrameOffset::ZERO; AnimationState::COUNT];
    }

    /// `(state, offset)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (AnimationState, FrameOffset)> + '_ {
        AnimationState::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl From<BTreeMap<AnimationState, FrameOffset>> for OffsetTable {
    fn from(map: BTreeMap<AnimationState, FrameOffset>) -> Self {
        let mut table = Self::default();
        for (state, offset) in map {
            table.set(state, offset);
        }
        table
    }
}

impl From<OffsetTable> for BTreeMap<AnimationState, FrameOffset> {
    fn from(table: OffsetTable) -> Self {
        table.iter().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
