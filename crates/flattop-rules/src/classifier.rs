//! Aircraft mission classifier (rule 8.12).
//!
//! Partitions the aircraft stacks of one side in one hex into interceptors,
//! escorts and bombers. Stacks are addressed by index so the combat resolver
//! can hold them in place while hits are pending.

use serde::{Deserialize, Serialize};

use flattop_core::aircraft::AircraftGroup;
use flattop_core::enums::{Role, RoleCapability};
use flattop_core::formation::AirFormation;

/// Index of a stack: `formations[formation].groups[group]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupRef {
    pub formation: usize,
    pub group: usize,
}

impl GroupRef {
    pub fn new(formation: usize, group: usize) -> Self {
        Self { formation, group }
    }

    pub fn get<'a>(&self, formations: &'a [AirFormation]) -> Option<&'a AircraftGroup> {
        formations.get(self.formation)?.groups.get(self.group)
    }

    pub fn get_mut<'a>(
        &self,
        formations: &'a mut [AirFormation],
    ) -> Option<&'a mut AircraftGroup> {
        formations.get_mut(self.formation)?.groups.get_mut(self.group)
    }
}

/// Role assignment for one side's stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePartition {
    pub interceptors: Vec<GroupRef>,
    pub escorts: Vec<GroupRef>,
    pub bombers: Vec<GroupRef>,
}

impl RolePartition {
    pub fn role_of(&self, group: GroupRef) -> Option<Role> {
        if self.interceptors.contains(&group) {
            Some(Role::Interceptor)
        } else if self.escorts.contains(&group) {
            Some(Role::Escort)
        } else if self.bombers.contains(&group) {
            Some(Role::Bomber)
        } else {
            None
        }
    }
}

/// True if any stack is armed or can only ever fly as a bomber.
///
/// Must be known before any member of the formation is classified.
pub fn formation_has_bombers(formation: &AirFormation) -> bool {
    formation.groups.iter().any(|g| {
        g.count > 0
            && (g.is_armed() || g.aircraft_type.capability() == RoleCapability::BomberOnly)
    })
}

/// Role of one stack given its formation's has-bombers flag.
pub fn role_of(group: &AircraftGroup, formation_has_bombers: bool) -> Role {
    if group.is_armed() {
        return Role::Bomber;
    }
    match group.aircraft_type.capability() {
        RoleCapability::Versatile | RoleCapability::InterceptEscortOnly => {
            if formation_has_bombers {
                Role::Escort
            } else {
                Role::Interceptor
            }
        }
        RoleCapability::BomberOnly => Role::Bomber,
    }
}

/// Classify every live stack of the given formations.
pub fn classify(formations: &[AirFormation]) -> RolePartition {
    let mut partition = RolePartition::default();
    for (f_idx, formation) in formations.iter().enumerate() {
        let has_bombers = formation_has_bombers(formation);
        for (g_idx, group) in formation.groups.iter().enumerate() {
            if group.count == 0 {
                continue;
            }
            let slot = GroupRef::new(f_idx, g_idx);
            match role_of(group, has_bombers) {
                Role::Interceptor => partition.interceptors.push(slot),
                Role::Escort => partition.escorts.push(slot),
                Role::Bomber => partition.bombers.push(slot),
            }
        }
    }
    partition
}
