use crate::animation::AnimationGuide;
use crate::core::GameEngine;

/// Everything the renderer needs for one frame besides the engine itself.
pub struct GameRenderState<'a> {
    pub engine: &'a GameEngine,
    pub animation: Option<AnimationGuide>,
    pub last_delta: Option<u64>,
    pub won: bool,
    pub game_over: bool,
}

impl GameRenderState<'_> {
    /// Animation progress clamped for drawing; 1.0 when nothing is running.
    pub fn progress(&self) -> f32 {
        self.animation.map_or(1.0, |a| a.progress().min(1.0))
    }
}
