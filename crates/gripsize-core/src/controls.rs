//! Control registry: which handles are enabled and what they look like.

use crate::config::ControlEntry;
use crate::direction::ControlName;
use crate::host::ElementHost;
use crate::style::{HandleSpec, StyleMap};
use std::collections::HashMap;

/// Tracks the enabled flag of every control.
///
/// The flag is what decides whether pressing a handle starts a drag. Handle
/// elements in the visual tree are kept in step as a side effect, but a
/// handle can exist and still be disabled.
#[derive(Debug, Clone, Default)]
pub struct ControlRegistry {
    states: HashMap<ControlName, bool>,
}

impl ControlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configuration entries, installing handles.
    pub fn from_entries<H: ElementHost>(host: &mut H, entries: &[ControlEntry]) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.set_state(host, entry.name().clone(), entry.initially_enabled(), entry.handle_spec());
        }
        registry
    }

    /// Check if a control is enabled. Unknown controls are disabled.
    pub fn is_enabled(&self, name: &ControlName) -> bool {
        self.states.get(name).copied().unwrap_or(false)
    }

    /// Names of all controls the registry knows about.
    pub fn names(&self) -> impl Iterator<Item = &ControlName> {
        self.states.keys()
    }

    /// Enable or disable one control.
    ///
    /// Enabling with a spec that touches the tree creates the handle if it
    /// is missing, or restyles it if present. Disabling with such a spec
    /// removes the handle; disabling with [`HandleSpec::Untouched`] keeps it
    /// but gives it a neutral cursor.
    pub fn set_state<H: ElementHost>(&mut self, host: &mut H, name: ControlName, enabled: bool, spec: HandleSpec) {
        log::debug!("Control {} -> {}", name, if enabled { "enabled" } else { "disabled" });
        self.states.insert(name.clone(), enabled);

        if enabled {
            if spec.touches_tree() {
                let styles = spec.resolve(&name);
                if host.has_handle(&name) {
                    host.style_handle(&name, &styles);
                } else {
                    host.create_handle(&name, &styles);
                }
            }
            return;
        }

        if spec.touches_tree() {
            host.remove_handle(&name);
        } else if host.has_handle(&name) {
            host.style_handle(&name, &StyleMap::new().with("cursor", "auto"));
        }
    }

    /// Apply the same state to every configured control.
    ///
    /// Structured entries keep their own style override when the spec asks
    /// for default visuals.
    pub fn set_all<H: ElementHost>(&mut self, host: &mut H, entries: &[ControlEntry], enabled: bool, spec: &HandleSpec) {
        for entry in entries {
            let entry_spec = match (entry, spec) {
                (_, HandleSpec::Untouched) => HandleSpec::Untouched,
                (ControlEntry::Detailed { .. }, _) => entry.handle_spec(),
                (ControlEntry::Name(_), spec) => spec.clone(),
            };
            self.set_state(host, entry.name().clone(), enabled, entry_spec);
        }
    }

    /// Forget every control and remove its handle.
    pub fn clear<H: ElementHost>(&mut self, host: &mut H) {
        for name in self.states.keys() {
            host.remove_handle(name);
        }
        self.states.clear();
    }
}
