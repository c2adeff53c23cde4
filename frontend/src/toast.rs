//! Insertion-ordered toast queue.
//!
//! New toasts go to the tail, the dismiss timer removes the head, and a click
//! removes any toast by id without disturbing the others.

use std::collections::VecDeque;

use crate::types::{ToastKind, ToastMessage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    items: VecDeque<ToastMessage>,
    last_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast created at `now_ms` and return its id.
    ///
    /// Ids are the creation timestamp, bumped past the previous id when two
    /// toasts land in the same millisecond.
    pub fn push(&mut self, kind: ToastKind, description: impl Into<String>, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        self.items.push_back(ToastMessage::new(id, kind, description));
        id
    }

    /// Remove the oldest toast.
    pub fn dismiss_head(&mut self) -> Option<ToastMessage> {
        self.items.pop_front()
    }

    /// Remove the toast with `id`; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) -> Option<ToastMessage> {
        let index = self.items.iter().position(|t| t.id == id)?;
        self.items.remove(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToastMessage> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<ToastMessage> {
        self.items.iter().cloned().collect()
    }
}
