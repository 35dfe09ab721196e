// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory world used by the binary and the tests.
//!
//! Entities keep their state behind mutexes so the engine can move them
//! through shared handles. The world keeps a strong handle to every entity it
//! spawns; contexts only hold `Weak` ones.

use crate::traits::{BlockPos, CastingSite, EntityId, LivingEntity, Position, World};
use std::sync::{Arc, Mutex, PoisonError};

const PLACEHOLDER_NAME: &str = "placeholder";

#[derive(Debug)]
pub struct SandboxEntity {
    id: EntityId,
    name: String,
    position: Mutex<Position>,
    velocity: Mutex<Position>,
}

impl SandboxEntity {
    pub fn new(id: EntityId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            position: Mutex::new(Position::default()),
            velocity: Mutex::new(Position::default()),
        }
    }
}

impl LivingEntity for SandboxEntity {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn position(&self) -> Position {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_position(&self, position: Position) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = position;
    }

    fn velocity(&self) -> Position {
        *self.velocity.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_velocity(&self, velocity: Position) {
        *self.velocity.lock().unwrap_or_else(PoisonError::into_inner) = velocity;
    }
}

/// A fixed block a program can be cast from, e.g. a rune.
#[derive(Debug, Clone)]
pub struct SandboxSite {
    pos: BlockPos,
    label: String,
}

impl SandboxSite {
    pub fn new(pos: BlockPos, label: &str) -> Self {
        Self {
            pos,
            label: label.to_string(),
        }
    }
}

impl CastingSite for SandboxSite {
    fn block_pos(&self) -> BlockPos {
        self.pos
    }

    fn describe(&self) -> String {
        format!("{} @ {},{},{}", self.label, self.pos.x, self.pos.y, self.pos.z)
    }
}

#[derive(Debug)]
pub struct SandboxWorld {
    next_entity_id: u64,
    placeholder: Arc<SandboxEntity>,
    entities: Vec<Arc<SandboxEntity>>,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self {
            next_entity_id: 1,
            placeholder: Arc::new(SandboxEntity::new(EntityId(0), PLACEHOLDER_NAME)),
            entities: Vec::new(),
        }
    }

    pub fn spawn_entity(&mut self, name: &str) -> Arc<SandboxEntity> {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        let entity = Arc::new(SandboxEntity::new(id, name));
        self.entities.push(Arc::clone(&entity));
        entity
    }

    /// The synthetic actor handed out for casts without a living caster.
    pub fn placeholder(&self) -> &Arc<SandboxEntity> {
        &self.placeholder
    }

    pub fn entities(&self) -> &[Arc<SandboxEntity>] {
        &self.entities
    }

    /// Drop the world's handle to an entity, e.g. when it dies.
    pub fn despawn(&mut self, id: EntityId) -> Option<Arc<SandboxEntity>> {
        let index = self.entities.iter().position(|entity| entity.entity_id() == id)?;
        Some(self.entities.remove(index))
    }
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for SandboxWorld {
    fn placeholder_entity(&self) -> Arc<dyn LivingEntity> {
        self.placeholder.clone()
    }
}
