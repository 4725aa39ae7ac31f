use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Fault, Pos};

/// Shared identity of a register handle.
///
/// Every `Reg<T>` (and all its clones) points at one of these. The
/// `engaged` flag is set while the register is bound to a live run, which
/// is how binding the same register from two simultaneous runs is caught.
#[derive(Debug, Default)]
pub(crate) struct RegShared {
    engaged: AtomicBool,
}

struct Slot {
    shared: Arc<RegShared>,
    value: Option<Box<dyn Any>>,
}

/// Per-run mutable state: the register table.
///
/// One `RunState` exists per top-level run and is threaded through every
/// `Parser::parse` call. Registers are bound to a slot lazily on first use
/// and released when the run state is dropped, so a register outlives runs
/// but its contents never do.
pub struct RunState {
    slots: Vec<Slot>,
}

impl RunState {
    pub fn new() -> Self {
        RunState { slots: Vec::new() }
    }

    /// Find or create the slot for a register, engaging it for this run.
    fn bind(&mut self, shared: &Arc<RegShared>) -> Result<usize, Fault> {
        if let Some(index) = self
            .slots
            .iter()
            .position(|slot| Arc::ptr_eq(&slot.shared, shared))
        {
            return Ok(index);
        }
        if shared.engaged.swap(true, Ordering::SeqCst) {
            // Engaged but not in our table: some other live run owns it.
            return Err(Fault::RegisterReuse);
        }
        self.slots.push(Slot {
            shared: Arc::clone(shared),
            value: None,
        });
        Ok(self.slots.len() - 1)
    }

    pub(crate) fn read<T: Clone + 'static>(
        &mut self,
        shared: &Arc<RegShared>,
        pos: Pos,
    ) -> Result<T, Fault> {
        let index = self.bind(shared)?;
        self.slots[index]
            .value
            .as_ref()
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
            .ok_or(Fault::UnfilledRegister { pos })
    }

    pub(crate) fn write<T: 'static>(
        &mut self,
        shared: &Arc<RegShared>,
        value: T,
    ) -> Result<(), Fault> {
        let index = self.bind(shared)?;
        self.slots[index].value = Some(Box::new(value));
        Ok(())
    }

    /// Clone out the current contents, `None` meaning still unfilled.
    pub(crate) fn snapshot<T: Clone + 'static>(
        &mut self,
        shared: &Arc<RegShared>,
    ) -> Result<Option<T>, Fault> {
        let index = self.bind(shared)?;
        Ok(self.slots[index]
            .value
            .as_ref()
            .and_then(|value| value.downcast_ref::<T>())
            .cloned())
    }

    /// Put back a snapshot taken earlier, possibly returning the slot to
    /// its unfilled state.
    pub(crate) fn restore<T: 'static>(
        &mut self,
        shared: &Arc<RegShared>,
        saved: Option<T>,
    ) -> Result<(), Fault> {
        let index = self.bind(shared)?;
        self.slots[index].value = saved.map(|value| Box::new(value) as Box<dyn Any>);
        Ok(())
    }

    /// Drop a register's slot and release it, used by scoped allocation on
    /// every exit path.
    pub(crate) fn release(&mut self, shared: &Arc<RegShared>) {
        if let Some(index) = self
            .slots
            .iter()
            .position(|slot| Arc::ptr_eq(&slot.shared, shared))
        {
            let slot = self.slots.swap_remove(index);
            slot.shared.engaged.store(false, Ordering::SeqCst);
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::new()
    }
}

impl Drop for RunState {
    fn drop(&mut self) {
        for slot in &self.slots {
            slot.shared.engaged.store(false, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Pos {
        Pos {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn test_read_before_write_is_unfilled() {
        let shared = Arc::new(RegShared::default());
        let mut state = RunState::new();
        let result = state.read::<i32>(&shared, origin());
        assert_eq!(result, Err(Fault::UnfilledRegister { pos: origin() }));
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let shared = Arc::new(RegShared::default());
        let mut state = RunState::new();
        state.write(&shared, 42i32).unwrap();
        assert_eq!(state.read::<i32>(&shared, origin()), Ok(42));
    }

    #[test]
    fn test_two_simultaneous_runs_are_rejected() {
        let shared = Arc::new(RegShared::default());
        let mut first = RunState::new();
        first.write(&shared, 1i32).unwrap();

        let mut second = RunState::new();
        let result = second.write(&shared, 2i32);
        assert_eq!(result, Err(Fault::RegisterReuse));
    }

    #[test]
    fn test_register_is_released_when_run_ends() {
        let shared = Arc::new(RegShared::default());
        {
            let mut state = RunState::new();
            state.write(&shared, 1i32).unwrap();
        }
        // A later run may bind the same register afresh.
        let mut state = RunState::new();
        assert_eq!(
            state.read::<i32>(&shared, origin()),
            Err(Fault::UnfilledRegister { pos: origin() })
        );
    }

    #[test]
    fn test_restore_can_unfill() {
        let shared = Arc::new(RegShared::default());
        let mut state = RunState::new();
        state.write(&shared, 7i32).unwrap();
        let saved: Option<i32> = None;
        state.restore(&shared, saved).unwrap();
        assert_eq!(
            state.read::<i32>(&shared, origin()),
            Err(Fault::UnfilledRegister { pos: origin() })
        );
    }

    #[test]
    fn test_release_frees_the_slot() {
        let shared = Arc::new(RegShared::default());
        let mut state = RunState::new();
        state.write(&shared, 7i32).unwrap();
        state.release(&shared);

        // Releasing makes the register available to a different run.
        let mut other = RunState::new();
        assert!(other.write(&shared, 8i32).is_ok());
    }
}
