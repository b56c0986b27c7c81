use core::ops::{Deref, DerefMut};
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use slotmap::hop::HopSlotMap;
use slotmap::new_key_type;

use crate::base::{Direction, Point};
use crate::config::{GhostColor, GhostStart};

//////////////////////////////////////////////////////////////////////////////

// Entity

// Every entity moves a single cell per step. Speed is carried for drivers
// that animate between cells; the engine never consults it.
pub const DEFAULT_SPEED: i32 = 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entity {
    pub pos: Point,
    pub dir: Direction,
    pub speed: i32,
}

impl Entity {
    pub fn new(pos: Point) -> Self {
        Self { pos, dir: Direction::None, speed: DEFAULT_SPEED }
    }
}

//////////////////////////////////////////////////////////////////////////////

// Ghost

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ghost {
    pub entity: Entity,
    pub color: GhostColor,
    pub target: Point,
    pub scatter: Point,
    pub start: Point,
}

impl Ghost {
    pub fn new(args: &GhostStart, target: Point) -> Self {
        Self {
            entity: Entity::new(args.pos),
            color: args.color,
            target,
            scatter: args.scatter,
            start: args.pos,
        }
    }

    pub fn respawn(&mut self) {
        self.entity.pos = self.start;
        self.entity.dir = Direction::None;
    }
}

impl Deref for Ghost {
    type Target = Entity;
    fn deref(&self) -> &Self::Target { &self.entity }
}

impl DerefMut for Ghost {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.entity }
}

//////////////////////////////////////////////////////////////////////////////

// GhostMap

new_key_type! { pub struct GhostId; }

// Ghosts are only ever inserted, so iteration follows insertion order, which
// is the configured start order.
#[derive(Clone, Default)]
pub struct GhostMap(HopSlotMap<GhostId, Ghost>);

impl GhostMap {
    pub fn add(&mut self, ghost: Ghost) -> GhostId { self.0.insert(ghost) }

    pub fn get(&self, id: GhostId) -> Option<&Ghost> { self.0.get(id) }

    pub fn ids(&self) -> Vec<GhostId> { self.0.keys().collect() }

    pub fn iter(&self) -> Iter<'_> { Iter(self.0.iter()) }

    pub fn iter_mut(&mut self) -> IterMut<'_> { IterMut(self.0.iter_mut()) }
}

impl Index<GhostId> for GhostMap {
    type Output = Ghost;
    fn index(&self, id: GhostId) -> &Self::Output { &self.0[id] }
}

impl IndexMut<GhostId> for GhostMap {
    fn index_mut(&mut self, id: GhostId) -> &mut Self::Output { &mut self.0[id] }
}

impl<'a> IntoIterator for &'a GhostMap {
    type Item = (GhostId, &'a Ghost);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a> IntoIterator for &'a mut GhostMap {
    type Item = (GhostId, &'a mut Ghost);
    type IntoIter = IterMut<'a>;
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

//////////////////////////////////////////////////////////////////////////////

// GhostMap iterators

pub struct Iter<'a>(slotmap::hop::Iter<'a, GhostId, Ghost>);

pub struct IterMut<'a>(slotmap::hop::IterMut<'a, GhostId, Ghost>);

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> FusedIterator for IterMut<'a> {}

impl<'a> Iterator for Iter<'a> {
    type Item = (GhostId, &'a Ghost);
    fn next(&mut self) -> Option<Self::Item> { self.0.next() }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (GhostId, &'a mut Ghost);
    fn next(&mut self) -> Option<Self::Item> { self.0.next() }
}

//////////////////////////////////////////////////////////////////////////////
