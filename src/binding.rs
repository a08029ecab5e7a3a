//! Binding - a two-way getter/setter pair over one store field.
//!
//! Bindings are recreated on every redraw and hold no cached value: the
//! getter re-reads the store each time it is called, so external writes
//! between frames are always observed. `Rc<dyn Fn>` instead of `Box<dyn Fn>`
//! so a binding can be cloned into a widget node and into host-side event
//! dispatch without ownership issues.

use std::rc::Rc;

/// A getter/setter closure pair bound to one field of one store.
///
/// Both closures must address the same field; constructors on
/// [`DataStore`](crate::store::DataStore) guarantee this.
pub struct Binding<T> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}

impl<T> Binding<T> {
    /// Pair up a getter and a setter.
    pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Read the current value through the getter.
    pub fn get(&self) -> T {
        (self.get)()
    }

    /// Write a value through the setter. Write-through: the next `get`
    /// within the same redraw observes it.
    pub fn set(&self, value: T) {
        (self.set)(value);
    }
}

impl Binding<bool> {
    /// Flip the current value, as a checkbox press does.
    pub fn toggle(&self) {
        let current = self.get();
        self.set(!current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn cell_binding(cell: &Rc<Cell<i32>>) -> Binding<i32> {
        let read = cell.clone();
        let write = cell.clone();
        Binding::new(move || read.get(), move |v| write.set(v))
    }

    #[test]
    fn test_get_reads_through() {
        let cell = Rc::new(Cell::new(7));
        let binding = cell_binding(&cell);

        assert_eq!(binding.get(), 7);

        // External write between reads is observed - no caching
        cell.set(42);
        assert_eq!(binding.get(), 42);
    }

    #[test]
    fn test_set_writes_through() {
        let cell = Rc::new(Cell::new(0));
        let binding = cell_binding(&cell);

        binding.set(13);
        assert_eq!(cell.get(), 13);
        assert_eq!(binding.get(), 13, "read-back within same frame sees the write");
    }

    #[test]
    fn test_toggle() {
        let cell = Rc::new(Cell::new(false));
        let read = cell.clone();
        let write = cell.clone();
        let binding = Binding::new(move || read.get(), move |v| write.set(v));

        binding.toggle();
        assert!(cell.get());
        binding.toggle();
        assert!(!cell.get());
    }
}
