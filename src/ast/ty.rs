use std::fmt;

use super::Context;
use crate::collections::storage::{ArenaDeref, ArenaPtr, UniqueArenaPtr};

/// The data location of a reference-like value.
///
/// Value types (booleans, integers, addresses) are copied around and have
/// no data location. Reference types point into one of these regions, and
/// the region is part of the type itself.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub enum DataLocation {
    /// Persistent contract storage.
    Storage,
    /// Transient memory of a single call.
    Memory,
    /// The read-only calldata buffer of the current call.
    Calldata,
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLocation::Storage => write!(f, "storage"),
            DataLocation::Memory => write!(f, "memory"),
            DataLocation::Calldata => write!(f, "calldata"),
        }
    }
}

/// The type kinds of the language.
#[derive(Debug, Hash, Clone, PartialEq, Eq)]
pub enum TyData {
    /// A boolean.
    Bool,
    /// An unsigned integer with the given bit width.
    Uint(u16),
    /// An account address.
    Address,
    /// A dynamic byte array in the given data location.
    Bytes(DataLocation),
    /// A dynamic array in the given data location.
    Array { elem: Ty, location: DataLocation },
    /// A mapping. Mappings only ever live in storage.
    Mapping { key: Ty, value: Ty },
    /// A named struct in the given data location.
    Struct { name: String, location: DataLocation },
}

pub struct DisplayTy<'a> {
    ctx: &'a Context,
    data: &'a TyData,
}

impl<'a> fmt::Display for DisplayTy<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data {
            TyData::Bool => write!(f, "bool"),
            TyData::Uint(width) => write!(f, "uint{}", width),
            TyData::Address => write!(f, "address"),
            TyData::Bytes(location) => write!(f, "bytes {}", location),
            TyData::Array { elem, location } => {
                write!(f, "{}[] {}", elem.display(self.ctx), location)
            }
            TyData::Mapping { key, value } => write!(
                f,
                "mapping({} => {})",
                key.display(self.ctx),
                value.display(self.ctx)
            ),
            TyData::Struct { name, location } => write!(f, "struct {} {}", name, location),
        }
    }
}

/// A type of the language.
///
/// [Ty] wraps an interned pointer, so structurally equal types compare and
/// hash equal as handles. The associated arena is [Context].
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct Ty(UniqueArenaPtr<TyData>);

impl Ty {
    pub fn bool(ctx: &mut Context) -> Ty { Ty(ctx.tys.alloc(TyData::Bool)) }

    pub fn uint(ctx: &mut Context, width: u16) -> Ty { Ty(ctx.tys.alloc(TyData::Uint(width))) }

    pub fn address(ctx: &mut Context) -> Ty { Ty(ctx.tys.alloc(TyData::Address)) }

    pub fn bytes(ctx: &mut Context, location: DataLocation) -> Ty {
        Ty(ctx.tys.alloc(TyData::Bytes(location)))
    }

    pub fn array(ctx: &mut Context, elem: Ty, location: DataLocation) -> Ty {
        Ty(ctx.tys.alloc(TyData::Array { elem, location }))
    }

    pub fn mapping(ctx: &mut Context, key: Ty, value: Ty) -> Ty {
        Ty(ctx.tys.alloc(TyData::Mapping { key, value }))
    }

    pub fn struct_(ctx: &mut Context, name: impl Into<String>, location: DataLocation) -> Ty {
        Ty(ctx.tys.alloc(TyData::Struct {
            name: name.into(),
            location,
        }))
    }

    /// Whether a value of this type lives in the given data location.
    ///
    /// Value types live nowhere in particular and answer `false` for every
    /// location.
    pub fn data_stored_in(self, ctx: &Context, location: DataLocation) -> bool {
        match *self.deref(ctx) {
            TyData::Bool | TyData::Uint(_) | TyData::Address => false,
            TyData::Bytes(loc)
            | TyData::Array { location: loc, .. }
            | TyData::Struct { location: loc, .. } => loc == location,
            TyData::Mapping { .. } => location == DataLocation::Storage,
        }
    }

    pub fn display(self, ctx: &Context) -> DisplayTy<'_> {
        DisplayTy {
            ctx,
            data: self.deref(ctx),
        }
    }
}

impl ArenaPtr for Ty {
    type A = Context;
    type T = TyData;

    fn try_deref(self, ctx: &Self::A) -> Option<&Self::T> { ctx.try_deref(self) }

    fn try_deref_mut(self, ctx: &mut Self::A) -> Option<&mut Self::T> { ctx.try_deref_mut(self) }
}

impl ArenaDeref<TyData, Ty> for Context {
    fn try_deref(&self, ptr: Ty) -> Option<&TyData> { self.tys.try_deref(ptr.0) }

    fn try_deref_mut(&mut self, _ptr: Ty) -> Option<&mut TyData> {
        // interned types are immutable, aliasing handles must never observe
        // a change
        None
    }
}
