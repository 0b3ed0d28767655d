//! Device kinds the generator knows how to bridge

use dz_core::DeviceRecord;

/// Binary sensor device class for a switch type, `"none"` when unmapped
pub fn binary_device_class(switch_type: &str) -> &'static str {
    match switch_type {
        "Motion Sensor" => "motion",
        "Door Contact" | "Contact" => "opening",
        _ => "none",
    }
}

/// What a device from the `light` listing becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    Light { dimmable: bool },
    BinarySensor { device_class: &'static str },
    Lock,
}

impl SwitchKind {
    /// Kind for a device's switch type; `None` for unsupported switch types
    pub fn of(device: &DeviceRecord) -> Option<Self> {
        match device.switch_type.as_str() {
            "On/Off" | "Push On Button" => Some(SwitchKind::Light { dimmable: false }),
            "Dimmer" => Some(SwitchKind::Light { dimmable: true }),
            st @ ("Motion Sensor" | "Door Contact" | "Contact") => Some(SwitchKind::BinarySensor {
                device_class: binary_device_class(st),
            }),
            "Door Lock" => Some(SwitchKind::Lock),
            _ => None,
        }
    }
}

/// What a device from the `temp` listing reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temp,
    TempHumidity,
    TempHumidityBaro,
    Wind,
}

impl SensorKind {
    /// Kind for a device's type; `None` for unsupported types
    pub fn of(device: &DeviceRecord) -> Option<Self> {
        match device.device_type.as_str() {
            "Temp" => Some(SensorKind::Temp),
            "Temp + Humidity" => Some(SensorKind::TempHumidity),
            "Temp + Humidity + Baro" => Some(SensorKind::TempHumidityBaro),
            "Wind" => Some(SensorKind::Wind),
            _ => None,
        }
    }

    pub fn has_temperature(&self) -> bool {
        !matches!(self, SensorKind::Wind)
    }

    pub fn has_humidity(&self) -> bool {
        matches!(self, SensorKind::TempHumidity | SensorKind::TempHumidityBaro)
    }

    pub fn has_barometer(&self) -> bool {
        matches!(self, SensorKind::TempHumidityBaro)
    }
}

/// Utility meters are only bridged when they report energy in kWh
pub fn is_energy_meter(device: &DeviceRecord) -> bool {
    device.subtype == "kWh"
}
