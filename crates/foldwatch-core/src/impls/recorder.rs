//! Recorder - dispatch を記録するコールバック（テスト・CLI 用）

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::domain::PopulateError;
use crate::ports::Populate;

/// Records every element it is asked to populate, in dispatch order.
///
/// Clones share the log. Elements registered with [`Recorder::fail_on`] are
/// recorded and then reported as failures.
pub struct Recorder<E> {
    log: Rc<RefCell<Vec<E>>>,
    failing: Rc<RefCell<Vec<E>>>,
}

impl<E> Recorder<E> {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            failing: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: Clone> Recorder<E> {
    pub fn dispatched(&self) -> Vec<E> {
        self.log.borrow().clone()
    }

    pub fn fail_on(&self, element: E) {
        self.failing.borrow_mut().push(element);
    }
}

impl<E> Recorder<E> {
    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl<E> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self {
            log: Rc::clone(&self.log),
            failing: Rc::clone(&self.failing),
        }
    }
}

impl<E> Default for Recorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for Recorder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder").field("log", &self.log.borrow()).finish()
    }
}

impl<E: Clone + PartialEq + fmt::Debug> Populate<E> for Recorder<E> {
    fn populate(&mut self, element: &E) -> Result<(), PopulateError> {
        self.log.borrow_mut().push(element.clone());
        if self.failing.borrow().contains(element) {
            return Err(PopulateError::new(format!("refusing to populate {element:?}")));
        }
        Ok(())
    }
}
