// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Listener<E> = Rc<dyn Fn(&E)>;

/// Lista de subscribers compartida entre clones
pub struct Subscribers<E> {
    listeners: Rc<RefCell<Vec<Listener<E>>>>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&E) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(callback));
    }

    /// Notifica sobre una copia de la lista: un callback puede suscribir
    /// o limpiar sin chocar con el borrow
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self.listeners.borrow().clone();
        for callback in snapshot {
            callback(event);
        }
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Clone for Subscribers<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Subscribers<()>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Subscribers::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.subscribers.notify(&());
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.subscribers.notify(&());
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(move |_| callback());
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn callbacks_may_subscribe_while_being_notified() {
        let subscribers: Subscribers<u8> = Subscribers::new();
        let inner = subscribers.clone();
        subscribers.subscribe(move |_| inner.subscribe(|_| {}));

        subscribers.notify(&1);
        assert_eq!(subscribers.len(), 2);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(0_u32);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.subscribe(move || counter.set(counter.get() + 1));

        let other = state.clone();
        other.update(|v| *v += 5);

        assert_eq!(state.get(), 5);
        assert_eq!(hits.get(), 1);
    }
}
