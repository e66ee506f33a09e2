//! Module start-up order.
//!
//! A module only runs on top of the ones below it:
//! wan ← vlans ← tagging ← {firewall, ebtables, dmz}, and dmz also needs
//! the firewall.

use crate::api::Module;

/// Direct prerequisites of `module`, lowest layer first.
pub fn requires(module: Module) -> &'static [Module] {
    match module {
        Module::Wan => &[],
        Module::Vlans => &[Module::Wan],
        Module::Tagging => &[Module::Wan, Module::Vlans],
        Module::Firewall | Module::Ebtables => &[Module::Wan, Module::Vlans, Module::Tagging],
        Module::Dmz => &[Module::Wan, Module::Vlans, Module::Tagging, Module::Firewall],
    }
}

/// First prerequisite that is not running, if any.
pub fn missing_dependency(module: Module, is_active: impl Fn(Module) -> bool) -> Option<Module> {
    requires(module).iter().copied().find(|dep| !is_active(*dep))
}

/// Modules that have to be stopped before `module` can go down.
pub fn dependents(module: Module) -> Vec<Module> {
    Module::ALL
        .into_iter()
        .filter(|other| requires(*other).contains(&module))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_is_transitive() {
        for module in Module::ALL {
            for dep in requires(module) {
                assert!(dep < &module, "{dep} must come before {module}");
                for indirect in requires(*dep) {
                    assert!(requires(module).contains(indirect));
                }
            }
        }
    }

    #[test]
    fn test_missing_dependency() {
        let running = [Module::Wan, Module::Vlans];
        let active = |m: Module| running.contains(&m);

        assert_eq!(missing_dependency(Module::Wan, active), None);
        assert_eq!(missing_dependency(Module::Vlans, active), None);
        assert_eq!(missing_dependency(Module::Firewall, active), Some(Module::Tagging));
        assert_eq!(missing_dependency(Module::Dmz, |m| m != Module::Firewall), Some(Module::Firewall));
    }

    #[test]
    fn test_dependents() {
        assert_eq!(dependents(Module::Dmz), Vec::<Module>::new());
        assert_eq!(dependents(Module::Firewall), vec![Module::Dmz]);
        assert_eq!(
            dependents(Module::Tagging),
            vec![Module::Firewall, Module::Ebtables, Module::Dmz]
        );
    }
}
