use std::{collections::HashMap, fmt, rc::Rc};

use anyhow::Result;
use log::trace;

use crate::{
    event::{Category, DialogEvent, KeyId},
    ui::Ui,
};

use super::{Dialog, DialogContent};

pub const DEFAULT_PRIORITY: i32 = 100;

/// What a handler asks the dispatcher to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<R> {
    /// Keep feeding the event to lower-priority handlers.
    Continue,
    /// The event is consumed; skip the remaining handlers.
    Handled,
    /// Leave the modal loop, optionally with a result.
    Exit(Option<R>),
}

type HandlerFn<C> =
    dyn Fn(&mut Dialog<C>, &mut Ui, &DialogEvent) -> Result<Flow<<C as DialogContent>::Output>>;

/// Shared callback. Clones compare equal, which is what `remove_handler` uses
/// to find every registration of the same callback.
pub struct Handler<C: DialogContent>(Rc<HandlerFn<C>>);

impl<C: DialogContent> Handler<C> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut Dialog<C>, &mut Ui, &DialogEvent) -> Result<Flow<C::Output>> + 'static,
    {
        Self(Rc::new(callback))
    }

    pub(crate) fn call(
        &self,
        dialog: &mut Dialog<C>,
        ui: &mut Ui,
        event: &DialogEvent,
    ) -> Result<Flow<C::Output>> {
        (self.0)(dialog, ui, event)
    }
}

impl<C: DialogContent> Clone for Handler<C> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C: DialogContent> PartialEq for Handler<C> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<C: DialogContent> Eq for Handler<C> {}

impl<C: DialogContent> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

pub(crate) struct Entry<C: DialogContent> {
    pub(crate) priority: i32,
    pub(crate) handler: Handler<C>,
}

impl<C: DialogContent> Clone for Entry<C> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            handler: self.handler.clone(),
        }
    }
}

/// Priority-ordered handler lists, per category and per key identity.
pub(crate) struct HandlerRegistry<C: DialogContent> {
    by_category: HashMap<Category, Vec<Entry<C>>>,
    by_key: HashMap<KeyId, Vec<Entry<C>>>,
}

impl<C: DialogContent> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self {
            by_category: HashMap::new(),
            by_key: HashMap::new(),
        }
    }
}

impl<C: DialogContent> HandlerRegistry<C> {
    pub(crate) fn add(&mut self, category: Category, handler: Handler<C>, priority: i32) {
        trace!("add {category:?} handler {handler:?} at priority {priority}");
        insert_sorted(
            self.by_category.entry(category).or_default(),
            Entry { priority, handler },
        );
    }

    pub(crate) fn remove(&mut self, category: Category, handler: &Handler<C>) {
        if let Some(list) = self.by_category.get_mut(&category) {
            list.retain(|entry| entry.handler != *handler);
        }
    }

    pub(crate) fn add_key(&mut self, key: KeyId, handler: Handler<C>, priority: i32) {
        trace!("add {key:?} key handler {handler:?} at priority {priority}");
        insert_sorted(
            self.by_key.entry(key).or_default(),
            Entry { priority, handler },
        );
    }

    pub(crate) fn remove_key(&mut self, key: KeyId, handler: &Handler<C>) {
        if let Some(list) = self.by_key.get_mut(&key) {
            list.retain(|entry| entry.handler != *handler);
        }
    }

    pub(crate) fn has(&self, category: Category) -> bool {
        self.by_category
            .get(&category)
            .is_some_and(|list| !list.is_empty())
    }

    pub(crate) fn category_len(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }

    pub(crate) fn key_len(&self, key: KeyId) -> usize {
        self.by_key.get(&key).map_or(0, Vec::len)
    }

    /// Copies the applicable lists into one priority-ordered list.
    ///
    /// Lists are concatenated in argument order (categories, then keys) and
    /// stably sorted, so equal priorities keep that order and, within one
    /// list, registration order.
    pub(crate) fn snapshot(&self, categories: &[Category], keys: &[KeyId]) -> Vec<Entry<C>> {
        let from_categories = categories
            .iter()
            .filter_map(|category| self.by_category.get(category));
        let from_keys = keys.iter().filter_map(|key| self.by_key.get(key));
        let mut merged: Vec<Entry<C>> = from_categories
            .chain(from_keys)
            .flat_map(|list| list.iter().cloned())
            .collect();
        merged.sort_by_key(|entry| entry.priority);
        merged
    }
}

fn insert_sorted<C: DialogContent>(list: &mut Vec<Entry<C>>, entry: Entry<C>) {
    let index = list.partition_point(|existing| existing.priority <= entry.priority);
    list.insert(index, entry);
}
