//! Normalized window store ordered by focus stamp.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::model::{OpenWindowRequest, WindowId, WindowRecord};

#[derive(Debug, Clone, Default)]
pub struct WindowStore {
    entities: IndexMap<WindowId, WindowRecord>,
    revision: u64,
    next_generated: u64,
    last_stamp: u64,
    ordered: RefCell<Option<(u64, Rc<[WindowRecord]>)>>,
}

impl PartialEq for WindowStore {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every window at once.
    pub fn init_windows(&mut self, windows: Vec<WindowRecord>) {
        let mut entities = IndexMap::with_capacity(windows.len());
        for window in windows {
            entities.insert(window.id.clone(), window);
        }
        self.last_stamp = entities
            .values()
            .map(|w| w.focused_at)
            .max()
            .unwrap_or(0)
            .max(self.last_stamp);
        self.entities = entities;
        self.bump();
    }

    /// Creates a window stamped as the most recently focused one.
    ///
    /// Returns `None` when the requested id is already taken.
    pub fn open_window(&mut self, req: OpenWindowRequest, now_ms: u64) -> Option<WindowId> {
        let id = match req.id {
            Some(id) if self.entities.contains_key(&id) => return None,
            Some(id) => id,
            None => self.generate_id(),
        };
        let focused_at = self.next_stamp(now_ms);
        self.entities.insert(
            id.clone(),
            WindowRecord {
                id: id.clone(),
                title: req.title,
                kind: req.kind,
                params: req.params,
                focused_at,
            },
        );
        self.bump();
        Some(id)
    }

    pub fn close_window(&mut self, id: &WindowId) -> bool {
        if self.entities.shift_remove(id).is_none() {
            return false;
        }
        self.bump();
        true
    }

    pub fn focus_window(&mut self, id: &WindowId, now_ms: u64) -> bool {
        if !self.entities.contains_key(id) {
            return false;
        }
        let stamp = self.next_stamp(now_ms);
        if let Some(window) = self.entities.get_mut(id) {
            window.focused_at = stamp;
        }
        self.bump();
        true
    }

    /// Windows by ascending focus stamp; the last one is topmost and focused.
    ///
    /// Equal stamps keep insertion order.
    pub fn select_all_windows(&self) -> Rc<[WindowRecord]> {
        let mut cached = self.ordered.borrow_mut();
        if let Some((revision, ordered)) = cached.as_ref() {
            if *revision == self.revision {
                return ordered.clone();
            }
        }
        let mut windows: Vec<WindowRecord> = self.entities.values().cloned().collect();
        windows.sort_by_key(|w| w.focused_at);
        let ordered: Rc<[WindowRecord]> = Rc::from(windows);
        *cached = Some((self.revision, ordered.clone()));
        ordered
    }

    pub fn select_window_by_id(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.entities.get(id)
    }

    pub fn select_window_ids(&self) -> impl Iterator<Item = &WindowId> {
        self.entities.keys()
    }

    pub fn select_total_windows(&self) -> usize {
        self.entities.len()
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.select_all_windows().last().map(|w| w.id.clone())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn generate_id(&mut self) -> WindowId {
        loop {
            self.next_generated = self.next_generated.saturating_add(1);
            let id = WindowId::generated(self.next_generated);
            if !self.entities.contains_key(&id) {
                return id;
            }
        }
    }

    /// Strictly increasing even when the clock stalls or steps back.
    fn next_stamp(&mut self, now_ms: u64) -> u64 {
        let stamp = now_ms.max(self.last_stamp.saturating_add(1));
        self.last_stamp = stamp;
        stamp
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
