pub mod dmz;
pub mod tagging;
pub mod vlan;
pub mod wan;
