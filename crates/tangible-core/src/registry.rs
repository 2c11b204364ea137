//! Ordered collection of the scene's haptic objects

use uuid::Uuid;

use crate::object::HapticObject;

/// Exclusive owner of every haptic object and its mesh
///
/// Membership and order are fixed after scene initialization; only the
/// per-object mutable fields change afterwards. Other components refer to
/// objects by index or id, never by independent copies.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: Vec<HapticObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object during scene initialization, returning its index
    pub fn insert(&mut self, object: HapticObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Index of the object with the given external shape identity
    ///
    /// Absence is a normal control path (events can arrive for objects that
    /// are not in the registry), so a miss is `None`, never a panic.
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.objects.iter().position(|object| object.id == id)
    }

    pub fn object(&self, index: usize) -> &HapticObject {
        &self.objects[index]
    }

    pub fn object_mut(&mut self, index: usize) -> &mut HapticObject {
        &mut self.objects[index]
    }

    pub fn get(&self, id: Uuid) -> Option<&HapticObject> {
        self.index_of(id).map(|index| &self.objects[index])
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut HapticObject> {
        self.index_of(id).map(|index| &mut self.objects[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &HapticObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut HapticObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
