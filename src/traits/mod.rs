pub mod instruction;
pub mod world;

pub use instruction::{CancelObserver, ContextManipulator, Effect, Resolution};
pub use world::{BlockPos, CastingSite, EntityId, LivingEntity, Position, World};
