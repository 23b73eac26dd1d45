use serde::{Deserialize, Serialize};

/// Looping style of a texture animation group.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AnimationLoopKind {
    #[default]
    Forward,
    BackAndForth,
}

/// One of a level's texture animation groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureAnimation {
    /// Milliseconds per frame.
    pub frame_time: u16,
    pub frame_count: u8,
    pub loop_kind: AnimationLoopKind,
}

impl TextureAnimation {
    /// Applies a partial update; present fields overwrite, absent fields stay.
    pub fn apply(&mut self, patch: &TextureAnimationProperties) {
        if let Some(frame_time) = patch.frame_time {
            self.frame_time = frame_time;
        }
        if let Some(frame_count) = patch.frame_count {
            self.frame_count = frame_count;
        }
        if let Some(loop_kind) = patch.loop_kind {
            self.loop_kind = loop_kind;
        }
    }
}

/// Partial animation-group update; `None` leaves a field unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureAnimationProperties {
    pub frame_time: Option<u16>,
    pub frame_count: Option<u8>,
    pub loop_kind: Option<AnimationLoopKind>,
}
