//! Host bindings behind input and output symbols.

use std::cell::Cell;
use std::rc::Rc;

/// Where an input symbol reads its value from.
pub enum InputBinding<T> {
    /// A host variable shared with the engine.
    Variable(Rc<Cell<T>>),
    /// A host getter evaluated on every read.
    Function(Box<dyn Fn() -> T>),
}

impl<T: Copy> InputBinding<T> {
    pub fn variable(cell: Rc<Cell<T>>) -> Self {
        InputBinding::Variable(cell)
    }

    pub fn function(getter: impl Fn() -> T + 'static) -> Self {
        InputBinding::Function(Box::new(getter))
    }

    pub fn get(&self) -> T {
        match self {
            InputBinding::Variable(cell) => cell.get(),
            InputBinding::Function(getter) => getter(),
        }
    }
}

impl<T> From<Rc<Cell<T>>> for InputBinding<T> {
    fn from(cell: Rc<Cell<T>>) -> Self {
        InputBinding::Variable(cell)
    }
}

/// Where an output symbol writes its value to.
pub enum OutputBinding<T> {
    /// A host variable shared with the engine.
    Variable(Rc<Cell<T>>),
    /// A host setter / getter pair.
    Accessors {
        set: Box<dyn Fn(T)>,
        get: Box<dyn Fn() -> T>,
    },
}

impl<T: Copy> OutputBinding<T> {
    pub fn variable(cell: Rc<Cell<T>>) -> Self {
        OutputBinding::Variable(cell)
    }

    pub fn accessors(set: impl Fn(T) + 'static, get: impl Fn() -> T + 'static) -> Self {
        OutputBinding::Accessors {
            set: Box::new(set),
            get: Box::new(get),
        }
    }

    pub fn set(&self, value: T) {
        match self {
            OutputBinding::Variable(cell) => cell.set(value),
            OutputBinding::Accessors { set, .. } => set(value),
        }
    }

    pub fn get(&self) -> T {
        match self {
            OutputBinding::Variable(cell) => cell.get(),
            OutputBinding::Accessors { get, .. } => get(),
        }
    }
}

impl<T> From<Rc<Cell<T>>> for OutputBinding<T> {
    fn from(cell: Rc<Cell<T>>) -> Self {
        OutputBinding::Variable(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_variable_tracks_host_value() {
        let cell = Rc::new(Cell::new(1.5));
        let binding = InputBinding::from(cell.clone());
        assert_eq!(binding.get(), 1.5);
        cell.set(-2.0);
        assert_eq!(binding.get(), -2.0);
    }

    #[test]
    fn test_input_function_is_called_on_every_read() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let binding = InputBinding::function(move || {
            counter.set(counter.get() + 1);
            counter.get() > 1
        });
        assert!(!binding.get());
        assert!(binding.get());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_output_accessors() {
        let store = Rc::new(Cell::new(0));
        let (w, r) = (store.clone(), store.clone());
        let binding = OutputBinding::accessors(move |v| w.set(v * 10), move || r.get() / 10);
        binding.set(4);
        assert_eq!(store.get(), 40);
        assert_eq!(binding.get(), 4);
    }
}
