//! The world-facing collaborators the engine talks to.
//!
//! The engine never owns entities or casting sites. It holds `Weak` handles to
//! them and asks the [`World`] for a placeholder actor when no living caster is
//! available.

use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Integer tile coordinates of a casting site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn to_position(self) -> Position {
        Position::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

/// A living entity owned by the world.
///
/// Implementations use interior mutability; the engine only ever holds shared
/// handles.
pub trait LivingEntity: Send + Sync + Debug {
    fn entity_id(&self) -> EntityId;

    fn name(&self) -> String;

    fn position(&self) -> Position;

    fn set_position(&self, position: Position);

    fn velocity(&self) -> Position;

    fn set_velocity(&self, velocity: Position);
}

/// A world location a program can be cast from without a living caster.
pub trait CastingSite: Send + Sync + Debug {
    fn block_pos(&self) -> BlockPos;

    fn describe(&self) -> String;
}

pub trait World {
    /// A synthetic actor used when nothing living cast the program.
    fn placeholder_entity(&self) -> Arc<dyn LivingEntity>;
}
