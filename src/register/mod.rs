//! Typed mutable registers, scoped to a single top-level run.
//!
//! A [`Reg`] is a handle: cheap to clone, freely embeddable in parser
//! values, and storing nothing itself. The value lives in the run's
//! [`RunState`] slot table, bound lazily on first use, so the same parser
//! value can run concurrently in two threads with independent register
//! contents. Binding one register from two simultaneously live runs is
//! detected and rejected.

pub mod scope;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::Failure;
use crate::lift::Ap;
use crate::map::Map;
use crate::parser::{Parser, Step};
use crate::state::{RegShared, RunState};

pub use scope::{fill_reg, persist, FillReg, Persist, Rollback};

/// A typed register: a mutable cell whose lifetime is one top-level run.
pub struct Reg<T> {
    shared: Arc<RegShared>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Clone for Reg<T> {
    fn clone(&self) -> Self {
        Reg {
            shared: Arc::clone(&self.shared),
            _marker: PhantomData,
        }
    }
}

impl<T> Reg<T> {
    /// Create a fresh, unbound register.
    pub fn new() -> Self {
        Reg {
            shared: Arc::new(RegShared::default()),
            _marker: PhantomData,
        }
    }

    pub(crate) fn shared(&self) -> &Arc<RegShared> {
        &self.shared
    }
}

impl<T> Default for Reg<T> {
    fn default() -> Self {
        Reg::new()
    }
}

impl<T: Clone + 'static> Reg<T> {
    /// Read the register; fails with a fault if nothing was written yet.
    pub fn get(&self) -> Get<T> {
        Get { reg: self.clone() }
    }

    /// Read the register through a pure function.
    pub fn gets<F, U>(&self, f: F) -> Map<Get<T>, F>
    where
        F: Fn(T) -> U,
    {
        Map::new(self.get(), f)
    }

    /// Read the register through a parsed function.
    pub fn gets_from<PF>(&self, pf: PF) -> Ap<PF, Get<T>> {
        Ap::new(pf, self.get())
    }

    /// Write a literal value.
    pub fn put(&self, value: T) -> PutValue<T> {
        PutValue {
            reg: self.clone(),
            value,
        }
    }

    /// Write the result of running a parser.
    pub fn put_from<P>(&self, parser: P) -> Put<T, P> {
        Put {
            reg: self.clone(),
            parser,
        }
    }

    /// Write the result of a parser passed through a pure function.
    pub fn puts<P, F, U>(&self, parser: P, f: F) -> Put<T, Map<P, F>>
    where
        F: Fn(U) -> T,
    {
        self.put_from(Map::new(parser, f))
    }

    /// Atomic read-modify-write with a pure function.
    pub fn modify<F>(&self, f: F) -> Modify<T, F>
    where
        F: Fn(T) -> T,
    {
        Modify {
            reg: self.clone(),
            f,
        }
    }

    /// Read-modify-write where the function itself is parsed first.
    pub fn modify_from<PF>(&self, pf: PF) -> Put<T, Ap<PF, Get<T>>> {
        self.put_from(Ap::new(pf, self.get()))
    }

    /// Run `body` with the register temporarily set to `value`.
    ///
    /// The previous contents are restored when the body succeeds; on
    /// failure the register keeps whatever the body left in it. Pair with
    /// [`rollback`](Reg::rollback) when full restoration is needed.
    pub fn local_value<P>(&self, value: T, body: P) -> scope::LocalValue<T, P> {
        scope::LocalValue::new(self.clone(), value, body)
    }

    /// As [`local_value`](Reg::local_value), deriving the new contents
    /// from the old with a pure function.
    pub fn local_with<F, P>(&self, f: F, body: P) -> scope::LocalWith<T, F, P>
    where
        F: Fn(T) -> T,
    {
        scope::LocalWith::new(self.clone(), f, body)
    }

    /// As [`local_value`](Reg::local_value), parsing the new contents.
    pub fn local_from<Q, P>(&self, source: Q, body: P) -> scope::LocalFrom<T, Q, P> {
        scope::LocalFrom::new(self.clone(), source, body)
    }

    /// Restore the register if the wrapped parser fails without consuming.
    pub fn rollback<P>(&self, parser: P) -> Rollback<T, P> {
        Rollback::new(self.clone(), parser)
    }
}

/// Non-consuming read of a register.
pub struct Get<T> {
    reg: Reg<T>,
}

impl<T> Clone for Get<T> {
    fn clone(&self) -> Self {
        Get {
            reg: self.reg.clone(),
        }
    }
}

impl<'src, T: Clone + 'static> Parser<'src> for Get<T> {
    type Output = T;

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        match state.read::<T>(self.reg.shared(), cursor.pos()) {
            Ok(value) => Ok((value, cursor)),
            Err(fault) => Err(Failure::fault(fault)),
        }
    }
}

/// Non-consuming write of a literal value.
pub struct PutValue<T> {
    reg: Reg<T>,
    value: T,
}

impl<'src, T: Clone + 'static> Parser<'src> for PutValue<T> {
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        state
            .write(self.reg.shared(), self.value.clone())
            .map_err(Failure::fault)?;
        Ok(((), cursor))
    }
}

/// Write the result of running a parser into a register.
pub struct Put<T, P> {
    reg: Reg<T>,
    parser: P,
}

impl<'src, T, P> Parser<'src> for Put<T, P>
where
    T: Clone + 'static,
    P: Parser<'src, Output = T>,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let (value, cursor) = self.parser.parse(state, cursor)?;
        state
            .write(self.reg.shared(), value)
            .map_err(Failure::fault)?;
        Ok(((), cursor))
    }
}

/// Non-consuming read-modify-write.
pub struct Modify<T, F> {
    reg: Reg<T>,
    f: F,
}

impl<'src, T, F> Parser<'src> for Modify<T, F>
where
    T: Clone + 'static,
    F: Fn(T) -> T,
{
    type Output = ();

    fn parse(&self, state: &mut RunState, cursor: Cursor<'src>) -> Step<'src, Self::Output> {
        let value = state
            .read::<T>(self.reg.shared(), cursor.pos())
            .map_err(Failure::fault)?;
        state
            .write(self.reg.shared(), (self.f)(value))
            .map_err(Failure::fault)?;
        Ok(((), cursor))
    }
}
