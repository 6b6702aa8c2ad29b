use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::value::Value;

type Bindings = HashMap<String, Value>;

/// The single, flat name -> value mapping of a program run.
///
/// Cloning an `Environment` clones the handle, not the bindings: every clone
/// observes the same mutations. Callables hold a weak handle to it, so a
/// function bound inside the environment does not keep it alive.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Rc<RefCell<Bindings>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Bind `name`, replacing any previous value
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// A copy of the current bindings, ordered by name
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.bindings
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Whether both handles refer to the same bindings
    pub fn same_as(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings)
    }

    pub(crate) fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.bindings))
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.snapshot()).finish()
    }
}

#[derive(Clone)]
pub(crate) struct WeakEnvironment(Weak<RefCell<Bindings>>);

impl WeakEnvironment {
    pub(crate) fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(|bindings| Environment { bindings })
    }

    pub(crate) fn ptr_eq(&self, other: &WeakEnvironment) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}
