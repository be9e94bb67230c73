use crate::color::Rgba8;

/// How a brush dab combines with the pixels already on a layer.
#[derive(
    strum::AsRefStr,
    PartialEq,
    Eq,
    strum::EnumIter,
    Copy,
    Clone,
    Hash,
    Debug,
)]
#[repr(u8)]
pub enum BlendOp {
    /// Paint over what is already there.
    SourceOver,
    /// Clear what is already there, brush-shaped. The eraser.
    DestinationOut,
}
impl Default for BlendOp {
    fn default() -> Self {
        Self::SourceOver
    }
}
impl BlendOp {
    #[must_use]
    pub fn apply(self, src: Rgba8, dst: Rgba8) -> Rgba8 {
        match self {
            Self::SourceOver => src.over(dst),
            Self::DestinationOut => src.erase(dst),
        }
    }
}
