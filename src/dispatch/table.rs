/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The per-context table of resolved entry points.

use super::capabilities::Capabilities;
use super::registry::{Command, EntryPoint, ENTRY_POINTS};
use crate::error::GLError;
use std::ffi::c_void;
use std::ptr::NonNull;

/// State of one slot in an [EntryPointTable].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Not resolved yet. Calling through it is a bug.
    Unresolved,
    /// Bound to a native address. `bound_name` is the name it was found
    /// under, which may be an alternate name.
    Resolved {
        address: NonNull<c_void>,
        bound_name: &'static str,
    },
    /// Resolution was attempted and failed. `capability` is the feature that
    /// was expected to provide the entry point.
    Unavailable { capability: &'static str },
}

/// Entry point addresses for one context.
///
/// The table holds raw native addresses, so it is neither [Send] nor [Sync]:
/// a context's function pointers are only valid on the thread it is current
/// on, and the compiler won't let the table leave that thread. Other threads
/// must resolve their own tables.
///
/// Slots are only written while resolving (which needs `&mut`), and are
/// read-only afterwards.
#[derive(Debug)]
pub struct EntryPointTable {
    slots: Vec<SlotState>,
    resolved_against: Option<Capabilities>,
}

impl Default for EntryPointTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryPointTable {
    pub fn new() -> Self {
        EntryPointTable {
            slots: vec![SlotState::Unresolved; ENTRY_POINTS.len()],
            resolved_against: None,
        }
    }

    pub fn state(&self, entry_point: EntryPoint) -> SlotState {
        self.slots[entry_point as usize]
    }

    pub fn is_available(&self, entry_point: EntryPoint) -> bool {
        matches!(self.state(entry_point), SlotState::Resolved { .. })
    }

    /// The name an entry point was actually bound through, if it's resolved.
    pub fn bound_name(&self, entry_point: EntryPoint) -> Option<&'static str> {
        match self.state(entry_point) {
            SlotState::Resolved { bound_name, .. } => Some(bound_name),
            _ => None,
        }
    }

    /// The capabilities the table was last resolved against. [None] if it has
    /// never been fully resolved, or has been reset since.
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.resolved_against.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryPoint, SlotState)> + '_ {
        EntryPoint::ALL
            .iter()
            .map(move |&entry_point| (entry_point, self.state(entry_point)))
    }

    /// Forget everything, e.g. because the context was destroyed or lost.
    pub fn reset(&mut self) {
        self.slots.fill(SlotState::Unresolved);
        self.resolved_against = None;
    }

    pub(super) fn set(&mut self, entry_point: EntryPoint, state: SlotState) {
        self.slots[entry_point as usize] = state;
    }

    pub(super) fn set_resolved_against(&mut self, capabilities: Option<Capabilities>) {
        self.resolved_against = capabilities;
    }

    /// Get the typed function pointer for a command, or
    /// [GLError::FeatureUnavailable] if it couldn't be resolved.
    ///
    /// Panics if the table hasn't been resolved.
    pub fn function<C: Command>(&self) -> Result<C::Pointer, GLError> {
        let entry_point = C::ENTRY_POINT;
        match self.state(entry_point) {
            SlotState::Resolved { address, .. } => {
                assert_eq!(
                    std::mem::size_of::<C::Pointer>(),
                    std::mem::size_of::<NonNull<c_void>>()
                );
                // Safety: Command guarantees C::Pointer is the function
                // pointer type for this entry point, and the address was
                // produced by the loader for it.
                Ok(unsafe { std::mem::transmute_copy::<NonNull<c_void>, C::Pointer>(&address) })
            }
            SlotState::Unavailable { capability } => Err(GLError::FeatureUnavailable {
                name: entry_point.name(),
                capability,
            }),
            SlotState::Unresolved => panic!(
                "{} was called before its entry point table was resolved",
                entry_point.name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::registry::commands;

    extern "system" fn fake_finish() {}

    #[test]
    fn slot_states() {
        let mut table = EntryPointTable::new();
        assert!(table
            .iter()
            .all(|(_, state)| state == SlotState::Unresolved));

        let address = NonNull::new(fake_finish as extern "system" fn() as *mut c_void).unwrap();
        table.set(
            EntryPoint::Finish,
            SlotState::Resolved {
                address,
                bound_name: "glFinish",
            },
        );
        table.set(
            EntryPoint::PolygonMode,
            SlotState::Unavailable {
                capability: "GL_NV_polygon_mode",
            },
        );

        assert!(table.is_available(EntryPoint::Finish));
        assert_eq!(table.bound_name(EntryPoint::Finish), Some("glFinish"));
        assert!(!table.is_available(EntryPoint::PolygonMode));
        assert_eq!(table.bound_name(EntryPoint::PolygonMode), None);

        let finish = table.function::<commands::Finish>().unwrap();
        unsafe { finish() };

        assert_eq!(
            table.function::<commands::PolygonMode>().unwrap_err(),
            GLError::FeatureUnavailable {
                name: "glPolygonMode",
                capability: "GL_NV_polygon_mode"
            }
        );

        table.reset();
        assert_eq!(table.state(EntryPoint::Finish), SlotState::Unresolved);
        assert!(table.capabilities().is_none());
    }

    #[test]
    #[should_panic(expected = "glClear was called before")]
    fn calling_unresolved_slot_panics() {
        let table = EntryPointTable::new();
        let _ = table.function::<commands::Clear>();
    }
}
