use heapless::Vec;

use crate::config::MAX_ENTITIES;
use crate::entity::Entity;
use crate::error::{Error, Result};

/// Index of an entity inside its [`Registry`]; stable for the registry's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub(crate) usize);

impl EntityHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Fixed-capacity, insertion-ordered entity set with unique ids.
#[derive(Debug, Default)]
pub struct Registry {
    entities: Vec<Entity, MAX_ENTITIES>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    pub fn add(&mut self, entity: Entity) -> Result<EntityHandle> {
        if self.find(entity.id()).is_some() {
            return Err(Error::DuplicateEntity);
        }
        let handle = EntityHandle(self.entities.len());
        self.entities.push(entity).map_err(|_| Error::RegistryFull)?;
        Ok(handle)
    }

    pub fn find(&self, id: &str) -> Option<EntityHandle> {
        self.entities
            .iter()
            .position(|entity| entity.id() == id)
            .map(EntityHandle)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.entities.get_mut(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityHandle(index), entity))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        MAX_ENTITIES
    }
}
