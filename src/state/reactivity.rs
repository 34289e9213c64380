// ============================================================================
// REACTIVITY - Valor compartido con suscriptores para re-render de hooks
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Identificador de una suscripción (para darla de baja en el cleanup)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Subscribers {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(SubscriptionId, Callback)>>,
}

/// Estado reactivo: los clones comparten valor Y suscriptores
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<Subscribers>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(Subscribers {
                next_id: Cell::new(0),
                callbacks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = SubscriptionId(self.subscribers.next_id.get());
        self.subscribers.next_id.set(id.0 + 1);
        self.subscribers
            .callbacks
            .borrow_mut()
            .push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .callbacks
            .borrow_mut()
            .retain(|(sub_id, _)| *sub_id != id);
        log::debug!("🔕 Suscripción {:?} dada de baja ({} activas)", id, self.subscriber_count());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.callbacks.borrow().len()
    }

    /// Notificar a todos los subscribers
    fn notify(&self) {
        // Copia de la lista: un callback puede (des)suscribirse durante la notificación
        let callbacks: Vec<Callback> = self
            .subscribers
            .callbacks
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();

        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
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

impl<T> PartialEq for ReactiveState<T> {
    /// Igualdad por identidad (mismo estado compartido), útil como prop de Yew
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}
