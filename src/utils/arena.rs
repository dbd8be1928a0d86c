use std::ops::{Index, IndexMut};

/// Handle into an [`Arena`]. The generation is bumped every time a slot is freed, so a handle to
/// a freed (and possibly re-used) slot no longer resolves.
// u32 slots and generations keep handles at 8 bytes. `Arena::add` panics past `u32::MAX` slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ArenaIndex {
    slot: u32,
    generation: u32,
}

impl ArenaIndex {
    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

enum Slot<V> {
    Occupied { generation: u32, value: V },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Owned values addressed by index, with holes being re-used through an intrusive free list.
/// A small generational slot map.
pub struct Arena<V> {
    slots: Vec<Slot<V>>,
    free_head: Option<u32>,
    size: usize,
}

impl<V> Arena<V> {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            free_head: None,
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            size: 0,
        }
    }

    /// Store the value produced by `f`, which is handed the index the value will live at.
    pub fn add<F: FnOnce(ArenaIndex) -> V>(&mut self, f: F) -> ArenaIndex {
        let id = match self.free_head {
            None => {
                let id = ArenaIndex {
                    slot: next_slot(self.slots.len()),
                    generation: 0,
                };
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    value: f(id),
                });
                id
            }
            Some(slot) => {
                let (generation, next_free) = match &self.slots[slot as usize] {
                    Slot::Vacant {
                        generation,
                        next_free,
                    } => (*generation, *next_free),
                    Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
                };
                let id = ArenaIndex { slot, generation };
                self.slots[slot as usize] = Slot::Occupied {
                    generation,
                    value: f(id),
                };
                self.free_head = next_free;
                id
            }
        };
        self.size += 1;
        id
    }

    /// Remove and return the value at `id`. Returns `None` if the handle is stale.
    pub fn free(&mut self, id: ArenaIndex) -> Option<V> {
        let slot = self.slots.get_mut(id.slot as usize)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation => {}
            _ => return None,
        }
        let vacant = Slot::Vacant {
            generation: id.generation.wrapping_add(1),
            next_free: self.free_head,
        };
        let Slot::Occupied { value, .. } = std::mem::replace(slot, vacant) else {
            unreachable!("slot checked as occupied above");
        };
        self.free_head = Some(id.slot);
        self.size -= 1;
        Some(value)
    }

    pub fn get(&self, id: ArenaIndex) -> Option<&V> {
        match self.slots.get(id.slot as usize)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: ArenaIndex) -> Option<&mut V> {
        match self.slots.get_mut(id.slot as usize)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Drop every value. Slots are kept and their generations bumped, so no handle issued before
    /// the clear resolves afterwards.
    pub fn clear(&mut self) {
        let mut next_free = None;
        for (i, slot) in self.slots.iter_mut().enumerate().rev() {
            let generation = match slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => *generation,
            };
            *slot = Slot::Vacant {
                generation,
                next_free,
            };
            next_free = Some(next_slot(i));
        }
        self.free_head = next_free;
        self.size = 0;
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

fn next_slot(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(slot) => slot,
        Err(_) => panic!("arena holds more than u32::MAX slots"),
    }
}

impl<V> Index<ArenaIndex> for Arena<V> {
    type Output = V;

    fn index(&self, index: ArenaIndex) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("stale arena index {index:?}"),
        }
    }
}

impl<V> IndexMut<ArenaIndex> for Arena<V> {
    fn index_mut(&mut self, index: ArenaIndex) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(v) => v,
            None => panic!("stale arena index {index:?}"),
        }
    }
}
