//! Arena storage for front-end entities.
//!
//! Every entity of the front end (types, variable declarations, syntax
//! nodes, functions, basic blocks) lives in an arena owned by the
//! [Context](crate::ast::Context) and is addressed through a small copyable
//! handle. A handle is just an index, so it is `Copy + Eq + Hash` and can be
//! stored in analysis sets freely; the index is also the entity's stable
//! numeric id, which the diagnostic ordering relies on.
//!
//! Entities are never freed. An arena only grows while its context is
//! alive, and all of it is released when the context is dropped, so there
//! is no free list and no vacant slot to worry about.
//!
//! [UniqueArena] is the interning variant: allocating a value that is
//! already present returns the existing handle, which makes handle equality
//! coincide with structural equality. Types are stored this way.

use std::{
    collections::HashMap,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    marker::PhantomData,
};

/// Dereferencing of arena pointers, implemented by arena-like containers.
pub trait ArenaDeref<T, Ptr>
where
    Ptr: ArenaPtr<T = T, A = Self>,
{
    /// Try to get the value behind a pointer.
    ///
    /// Returns `None` if the pointer does not belong to this arena.
    fn try_deref(&self, ptr: Ptr) -> Option<&T>;

    /// Try to get the value behind a pointer, mutably.
    fn try_deref_mut(&mut self, ptr: Ptr) -> Option<&mut T>;
}

/// Allocation of values in an arena-like container.
pub trait ArenaAlloc<T, Ptr>: ArenaDeref<T, Ptr>
where
    Ptr: ArenaPtr<T = T, A = Self>,
{
    /// Allocate a value and return its pointer.
    fn alloc(&mut self, val: T) -> Ptr;
}

/// The pointer-like handle associated with an arena type.
pub trait ArenaPtr: Copy + Sized + Eq {
    /// The type of the dereferenced value.
    type T;

    /// The arena type this pointer belongs to.
    type A: ArenaDeref<Self::T, Self>;

    fn try_deref(self, arena: &Self::A) -> Option<&Self::T>;

    fn try_deref_mut(self, arena: &mut Self::A) -> Option<&mut Self::T>;

    /// Dereference the pointer.
    ///
    /// # Panics
    ///
    /// Panics if the pointer does not belong to the arena.
    fn deref(self, arena: &Self::A) -> &Self::T {
        self.try_deref(arena).expect("the arena pointer is invalid")
    }

    /// Dereference the pointer mutably.
    ///
    /// # Panics
    ///
    /// Panics if the pointer does not belong to the arena.
    fn deref_mut(self, arena: &mut Self::A) -> &mut Self::T {
        self.try_deref_mut(arena)
            .expect("the arena pointer is invalid")
    }
}

/// A pointer to a value in a [BaseArena].
pub struct BaseArenaPtr<T> {
    id: usize,
    _marker: PhantomData<T>,
}

impl<T> fmt::Debug for BaseArenaPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BaseArenaPtr({})", self.id)
    }
}

impl<T> PartialEq for BaseArenaPtr<T> {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl<T> Eq for BaseArenaPtr<T> {}

impl<T> Hash for BaseArenaPtr<T> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

impl<T> Clone for BaseArenaPtr<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for BaseArenaPtr<T> {}

impl<T> From<usize> for BaseArenaPtr<T> {
    fn from(id: usize) -> Self {
        BaseArenaPtr {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> BaseArenaPtr<T> {
    /// The index of the value in the arena, stable for the arena's lifetime.
    pub fn id(self) -> usize { self.id }
}

impl<T> ArenaPtr for BaseArenaPtr<T> {
    type A = BaseArena<T>;
    type T = T;

    fn try_deref(self, arena: &BaseArena<T>) -> Option<&T> { arena.try_deref(self) }

    fn try_deref_mut(self, arena: &mut BaseArena<T>) -> Option<&mut T> { arena.try_deref_mut(self) }
}

/// A grow-only arena backed by a vector.
pub struct BaseArena<T> {
    pool: Vec<T>,
}

impl<T> Default for BaseArena<T> {
    fn default() -> Self { BaseArena { pool: Vec::new() } }
}

impl<T> ArenaDeref<T, BaseArenaPtr<T>> for BaseArena<T> {
    fn try_deref(&self, ptr: BaseArenaPtr<T>) -> Option<&T> { self.pool.get(ptr.id()) }

    fn try_deref_mut(&mut self, ptr: BaseArenaPtr<T>) -> Option<&mut T> {
        self.pool.get_mut(ptr.id())
    }
}

impl<T> ArenaAlloc<T, BaseArenaPtr<T>> for BaseArena<T> {
    fn alloc(&mut self, val: T) -> BaseArenaPtr<T> {
        let ptr = BaseArenaPtr::from(self.pool.len());
        self.pool.push(val);
        ptr
    }
}

impl<T> BaseArena<T> {
    /// Iterate over the arena in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (BaseArenaPtr<T>, &T)> {
        self.pool
            .iter()
            .enumerate()
            .map(|(id, val)| (BaseArenaPtr::from(id), val))
    }

    pub fn len(&self) -> usize { self.pool.len() }

    pub fn is_empty(&self) -> bool { self.pool.is_empty() }
}

/// Implement the arena traits for a handle wrapping [BaseArenaPtr], stored
/// in a field of a container type.
#[macro_export]
macro_rules! impl_arena {
    ($arena:ty, $value:ty, $ptr:path, $field:ident) => {
        impl $crate::collections::storage::ArenaPtr for $ptr {
            type A = $arena;
            type T = $value;

            fn try_deref(self, arena: &Self::A) -> Option<&Self::T> {
                $crate::collections::storage::ArenaDeref::try_deref(arena, self)
            }

            fn try_deref_mut(self, arena: &mut Self::A) -> Option<&mut Self::T> {
                $crate::collections::storage::ArenaDeref::try_deref_mut(arena, self)
            }
        }

        impl $crate::collections::storage::ArenaDeref<$value, $ptr> for $arena {
            fn try_deref(&self, ptr: $ptr) -> Option<&$value> { self.$field.try_deref(ptr.0) }

            fn try_deref_mut(&mut self, ptr: $ptr) -> Option<&mut $value> {
                self.$field.try_deref_mut(ptr.0)
            }
        }

        impl $crate::collections::storage::ArenaAlloc<$value, $ptr> for $arena {
            fn alloc(&mut self, val: $value) -> $ptr { $ptr(self.$field.alloc(val)) }
        }
    };
}

/// An interning arena: structurally equal values share one pointer.
pub struct UniqueArena<T>
where
    T: Hash + Eq,
{
    arena: BaseArena<T>,
    unique_map: HashMap<u64, Vec<BaseArenaPtr<T>>>,
}

impl<T> Default for UniqueArena<T>
where
    T: Hash + Eq,
{
    fn default() -> Self {
        UniqueArena {
            arena: BaseArena::default(),
            unique_map: HashMap::new(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct UniqueArenaPtr<T>(BaseArenaPtr<T>);

impl<T> Clone for UniqueArenaPtr<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for UniqueArenaPtr<T> {}

impl<T> UniqueArenaPtr<T> {
    pub fn id(self) -> usize { self.0.id() }
}

impl<T> UniqueArena<T>
where
    T: Hash + Eq,
{
    fn hash_of(val: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        val.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a value: return the existing pointer if an equal value was
    /// allocated before, allocate otherwise.
    pub fn alloc(&mut self, val: T) -> UniqueArenaPtr<T> {
        let hash = Self::hash_of(&val);
        if let Some(ptrs) = self.unique_map.get(&hash) {
            for ptr in ptrs {
                if self.arena.try_deref(*ptr) == Some(&val) {
                    return UniqueArenaPtr(*ptr);
                }
            }
        }
        let ptr = self.arena.alloc(val);
        self.unique_map.entry(hash).or_default().push(ptr);
        UniqueArenaPtr(ptr)
    }

    pub fn try_deref(&self, ptr: UniqueArenaPtr<T>) -> Option<&T> { self.arena.try_deref(ptr.0) }
}
