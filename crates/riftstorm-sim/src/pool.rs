//! Fixed-capacity object pools with generational handles.
//!
//! Each pool owns its category's live-list in acquisition order (oldest
//! first). Released slots are reset to defaults, keep their heap capacity,
//! and bump their generation so outstanding handles stop resolving.

use riftstorm_core::components::*;
use riftstorm_core::config::PoolLimits;
use riftstorm_core::types::Handle;

/// An object a [`Pool`] can recycle.
pub trait Poolable: Default {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Restore every field to its default.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

struct Slot<T> {
    item: T,
    generation: u32,
    occupied: bool,
}

pub struct Pool<T> {
    name: &'static str,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: Vec<Handle<T>>,
    max: usize,
}

impl<T: Poolable> Pool<T> {
    /// Pre-allocate `limits.initial` objects; grow on demand up to `limits.max`.
    pub fn new(name: &'static str, limits: PoolLimits) -> Self {
        let initial = limits.initial.min(limits.max);
        let slots = (0..initial)
            .map(|_| Slot {
                item: T::default(),
                generation: 0,
                occupied: false,
            })
            .collect();
        // Reverse so the lowest index is handed out first.
        let free = (0..initial as u32).rev().collect();
        Self {
            name,
            slots,
            free,
            live: Vec::with_capacity(limits.max),
            max: limits.max,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Take a default-initialized object, marked active and appended to the
    /// live-list. `None` when the pool is at capacity.
    pub fn acquire(&mut self) -> Option<Handle<T>> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.slots.len() < self.max => {
                self.slots.push(Slot {
                    item: T::default(),
                    generation: 0,
                    occupied: false,
                });
                (self.slots.len() - 1) as u32
            }
            None => return None,
        };
        let slot = &mut self.slots[index as usize];
        slot.occupied = true;
        slot.item.body_mut().active = true;
        let handle = Handle::new(index, slot.generation);
        self.live.push(handle);
        Some(handle)
    }

    /// Return an object to the pool. No-op for stale or already-released handles.
    pub fn release(&mut self, handle: Handle<T>) -> bool {
        if !self.contains(handle) {
            return false;
        }
        self.vacate(handle.index);
        if let Some(pos) = self.live.iter().position(|&h| h == handle) {
            self.live.remove(pos);
        }
        true
    }

    /// Release every live object for which `keep` returns false, preserving
    /// the order of the survivors.
    pub fn retain_live(&mut self, mut keep: impl FnMut(Handle<T>, &mut T) -> bool) {
        let mut live = std::mem::take(&mut self.live);
        live.retain(|&handle| {
            let slot = &mut self.slots[handle.index as usize];
            if keep(handle, &mut slot.item) {
                return true;
            }
            slot.item.reset();
            slot.occupied = false;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(handle.index);
            false
        });
        self.live = live;
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.retain_live(|_, _| false);
    }

    fn vacate(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.item.reset();
        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|s| s.occupied && s.generation == handle.generation)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.occupied && s.generation == handle.generation)
            .map(|s| &s.item)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.occupied && s.generation == handle.generation)
            .map(|s| &mut s.item)
    }

    /// Live handles, oldest first.
    pub fn live(&self) -> &[Handle<T>] {
        &self.live
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.live
            .iter()
            .map(move |&h| (h, &self.slots[h.index as usize].item))
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Objects that can still be acquired.
    pub fn available(&self) -> usize {
        self.max - self.live.len()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }
}

impl Poolable for Foe {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn reset(&mut self) {
        let mut statuses = std::mem::take(&mut self.statuses);
        let mut modules = std::mem::take(&mut self.modules);
        statuses.clear();
        modules.clear();
        *self = Foe {
            statuses,
            modules,
            ..Default::default()
        };
    }
}

impl Poolable for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn reset(&mut self) {
        let mut trail = std::mem::take(&mut self.trail);
        let mut struck = std::mem::take(&mut self.struck);
        trail.clear();
        struck.clear();
        *self = Projectile {
            trail,
            struck,
            ..Default::default()
        };
    }
}

macro_rules! poolable_body {
    ($($ty:ty),*) => {
        $(
            impl Poolable for $ty {
                fn body(&self) -> &Body {
                    &self.body
                }

                fn body_mut(&mut self) -> &mut Body {
                    &mut self.body
                }
            }
        )*
    };
}

poolable_body!(Particle, Gem, Pickup, Debris);

#[cfg(test)]
mod tests {
    use super::*;

    fn gem_pool(initial: usize, max: usize) -> Pool<Gem> {
        Pool::new("gems", PoolLimits { initial, max })
    }

    #[test]
    fn acquire_respects_max() {
        let mut pool = gem_pool(1, 3);
        let handles: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
        assert!(handles.iter().all(Option::is_some));
        assert!(pool.acquire().is_none());
        assert_eq!(pool.live_count(), 3);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn acquired_objects_are_active() {
        let mut pool = gem_pool(2, 2);
        let h = pool.acquire().unwrap();
        assert!(pool.get(h).unwrap().body.active);
        assert_eq!(pool.live(), &[h]);
    }

    #[test]
    fn release_resets_and_bumps_generation() {
        let mut pool = gem_pool(1, 1);
        let h = pool.acquire().unwrap();
        pool.get_mut(h).unwrap().value = 42.0;
        assert!(pool.release(h));
        assert!(pool.get(h).is_none());

        let h2 = pool.acquire().unwrap();
        assert_eq!(h2.index, h.index);
        assert_ne!(h2.generation, h.generation);
        assert_eq!(pool.get(h2).unwrap().value, 0.0);
    }

    #[test]
    fn double_release_is_noop() {
        let mut pool = gem_pool(2, 2);
        let h = pool.acquire().unwrap();
        assert!(pool.release(h));
        assert!(!pool.release(h));
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn retain_live_preserves_order() {
        let mut pool = gem_pool(4, 4);
        let hs: Vec<_> = (0..4).map(|_| pool.acquire().unwrap()).collect();
        for (i, &h) in hs.iter().enumerate() {
            pool.get_mut(h).unwrap().value = i as f32;
        }
        pool.retain_live(|_, g| g.value as u32 % 2 == 0);
        assert_eq!(pool.live(), &[hs[0], hs[2]]);
        assert!(!pool.contains(hs[1]));
    }

    #[test]
    fn foe_reset_keeps_capacity() {
        let mut pool: Pool<Foe> = Pool::new("foes", PoolLimits { initial: 1, max: 1 });
        let h = pool.acquire().unwrap();
        let foe = pool.get_mut(h).unwrap();
        foe.statuses.reserve(8);
        foe.hp = 10.0;
        pool.release(h);
        let h = pool.acquire().unwrap();
        let foe = pool.get(h).unwrap();
        assert!(foe.statuses.is_empty());
        assert!(foe.statuses.capacity() >= 8);
        assert_eq!(foe.hp, 0.0);
    }

    #[test]
    fn clear_releases_everything() {
        let mut pool = gem_pool(0, 5);
        for _ in 0..5 {
            pool.acquire();
        }
        pool.clear();
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.available(), 5);
    }
}
