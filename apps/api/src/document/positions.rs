//! Dense position bookkeeping for ordered siblings (sections in a resume,
//! entries in a section).
//!
//! Vector order is the display order and `position` mirrors it: after every
//! structural change the siblings carry exactly `0..n-1`.

use crate::models::resume::{Entry, Section};

pub trait Positioned {
    fn position(&self) -> u32;
    fn set_position(&mut self, position: u32);
}

impl Positioned for Section {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

impl Positioned for Entry {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// Rewrites positions to match vector order.
pub fn repack<T: Positioned>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index as u32);
    }
}

/// Restores vector order from stored positions (stable for ties), then repacks.
pub fn sort_and_repack<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
    repack(items);
}

/// Inserts at `position` (clamped to the end; `None` appends), shifting later
/// siblings by one. Returns the position the item landed at.
pub fn insert_at<T: Positioned>(items: &mut Vec<T>, position: Option<u32>, item: T) -> u32 {
    let index = position.map_or(items.len(), |p| (p as usize).min(items.len()));
    items.insert(index, item);
    repack(items);
    index as u32
}

/// Removes the item at `index`, shifting later siblings back by one.
pub fn remove_at<T: Positioned>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index >= items.len() {
        return None;
    }
    let removed = items.remove(index);
    repack(items);
    Some(removed)
}

/// Moves the item at `from` to `to` (clamped to the last slot) and
/// re-sequences the whole sibling list. Returns the final position.
pub fn move_to<T: Positioned>(items: &mut Vec<T>, from: usize, to: u32) -> Option<u32> {
    if from >= items.len() {
        return None;
    }
    let item = items.remove(from);
    let index = (to as usize).min(items.len());
    items.insert(index, item);
    repack(items);
    Some(index as u32)
}

/// True when positions are exactly `0..n-1` in vector order.
pub fn is_dense<T: Positioned>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.position() == index as u32)
}
