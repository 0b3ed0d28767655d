//! Thermostat sub-device role inference
//!
//! A hub thermostat is reported as several independent devices. Which one
//! controls the mode, which one is the heating setpoint and so on is guessed
//! from type, subtype and name through an ordered predicate table.

use std::fmt;

use tracing::debug;

use dz_core::DeviceRecord;

/// Name fragments that mark a setpoint as the heating target
pub const HEATING_KEYWORDS: [&str; 5] = ["heat", "warm", "fire", "setpoint", "target"];

/// Name fragment of economy setpoints, never used as the target
pub const ECONOMY_KEYWORD: &str = "econ";

/// Role slot a thermostat sub-device can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Mode,
    FanMode,
    Setpoint,
    Temperature,
    OperatingState,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Mode => "mode",
            Role::FanMode => "fan mode",
            Role::Setpoint => "setpoint",
            Role::Temperature => "temperature",
            Role::OperatingState => "operating state",
        };
        f.write_str(name)
    }
}

/// Predicate deciding whether a device fills a role
pub type RolePredicate = Box<dyn Fn(&DeviceRecord) -> bool + Send + Sync>;

/// Ordered role predicate table; the first matching predicate wins
pub struct RoleClassifier {
    rules: Vec<(Role, RolePredicate)>,
}

impl RoleClassifier {
    /// Classifier with no rules; every device is left unassigned
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule, checked after every rule already present
    pub fn with_rule<F>(mut self, role: Role, predicate: F) -> Self
    where
        F: Fn(&DeviceRecord) -> bool + Send + Sync + 'static,
    {
        self.rules.push((role, Box::new(predicate)));
        self
    }

    /// Role of a single device, if any predicate matches
    pub fn classify(&self, device: &DeviceRecord) -> Option<Role> {
        self.rules
            .iter()
            .find(|(_, predicate)| predicate(device))
            .map(|(role, _)| *role)
    }

    /// Fill role slots from a cluster's members, in member order
    ///
    /// Unmatched devices are ignored. When two members match the same role,
    /// the later one takes the slot.
    pub fn assign<'a>(&self, members: &[&'a DeviceRecord]) -> RoleSlots<'a> {
        let mut slots = RoleSlots::default();
        for &device in members {
            match self.classify(device) {
                Some(role) => {
                    if let Some(previous) = slots.set(role, device) {
                        debug!(
                            "{} role moves from '{}' ({}) to '{}' ({})",
                            role, previous.name, previous.idx, device.name, device.idx
                        );
                    }
                }
                None => debug!("No thermostat role for '{}' ({})", device.name, device.idx),
            }
        }
        slots
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RoleClassifier {
    /// The hub's standard Z-Wave thermostat layout
    fn default() -> Self {
        Self::empty()
            .with_rule(Role::Mode, |d| d.subtype == "Thermostat Mode")
            .with_rule(Role::FanMode, |d| d.subtype == "Thermostat Fan Mode")
            .with_rule(Role::Setpoint, |d| {
                d.subtype == "SetPoint" && is_heating_setpoint_name(&d.name)
            })
            .with_rule(Role::Temperature, |d| d.device_type == "Temp")
            .with_rule(Role::OperatingState, |d| {
                d.subtype == "Thermostat Operating State"
            })
    }
}

impl fmt::Debug for RoleClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<Role> = self.rules.iter().map(|(role, _)| *role).collect();
        f.debug_struct("RoleClassifier").field("rules", &roles).finish()
    }
}

/// Whether a setpoint's name marks it as the heating target
///
/// Cooling setpoints are never matched.
pub fn is_heating_setpoint_name(name: &str) -> bool {
    let name = name.to_lowercase();
    !name.contains(ECONOMY_KEYWORD) && HEATING_KEYWORDS.iter().any(|k| name.contains(k))
}

/// At most one device per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSlots<'a> {
    pub mode: Option<&'a DeviceRecord>,
    pub fan_mode: Option<&'a DeviceRecord>,
    pub setpoint: Option<&'a DeviceRecord>,
    pub temperature: Option<&'a DeviceRecord>,
    pub operating_state: Option<&'a DeviceRecord>,
}

impl<'a> RoleSlots<'a> {
    /// Put a device in a slot, returning the device it replaced
    fn set(&mut self, role: Role, device: &'a DeviceRecord) -> Option<&'a DeviceRecord> {
        let slot = match role {
            Role::Mode => &mut self.mode,
            Role::FanMode => &mut self.fan_mode,
            Role::Setpoint => &mut self.setpoint,
            Role::Temperature => &mut self.temperature,
            Role::OperatingState => &mut self.operating_state,
        };
        slot.replace(device)
    }

    pub fn get(&self, role: Role) -> Option<&'a DeviceRecord> {
        match role {
            Role::Mode => self.mode,
            Role::FanMode => self.fan_mode,
            Role::Setpoint => self.setpoint,
            Role::Temperature => self.temperature,
            Role::OperatingState => self.operating_state,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.fan_mode.is_none()
            && self.setpoint.is_none()
            && self.temperature.is_none()
            && self.operating_state.is_none()
    }
}
