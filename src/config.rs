//! Defines the register values transmitted during `Display::init` that are
//! associated with relatively-static configuration.

use crate::command::{ComPinConfig, ComScanDirection, MemoryMode, SegmentRemap};

/// A configuration for the display. A fresh `Config` carries the values a 128x32
/// module running from the internal charge pump wants; builder methods override
/// individual registers. The mandated command ordering is owned by `Display::init`,
/// which always transmits the full sequence.
pub struct Config {
    pub(crate) clock_divide: u8,
    pub(crate) charge_pump: bool,
    pub(crate) memory_mode: MemoryMode,
    pub(crate) segment_remap: SegmentRemap,
    pub(crate) com_scan_direction: ComScanDirection,
    pub(crate) com_pin_config: ComPinConfig,
    pub(crate) contrast: u8,
    pub(crate) precharge_phases: (u8, u8),
    pub(crate) vcomh_deselect_level: u8,
}

impl Config {
    /// Create a configuration with the stock register values.
    pub fn new() -> Self {
        Config {
            clock_divide: 0x80,
            charge_pump: true,
            memory_mode: MemoryMode::Horizontal,
            segment_remap: SegmentRemap::Forward,
            com_scan_direction: ComScanDirection::RowZeroFirst,
            com_pin_config: ComPinConfig::Sequential,
            contrast: 0x8F,
            precharge_phases: (1, 15),
            vcomh_deselect_level: 0x40,
        }
    }

    /// Extend this `Config` with an explicit display clock setting. See
    /// `Command::SetDisplayClockDivide`.
    pub fn clock_divide(self, setting: u8) -> Self {
        Self {
            clock_divide: setting,
            ..self
        }
    }

    /// Extend this `Config` to enable or disable the internal charge pump. Modules
    /// powered from an external VCC rail disable it.
    pub fn charge_pump(self, enabled: bool) -> Self {
        Self {
            charge_pump: enabled,
            ..self
        }
    }

    /// Extend this `Config` with an explicit RAM addressing mode. See `MemoryMode`.
    pub fn memory_mode(self, mode: MemoryMode) -> Self {
        Self {
            memory_mode: mode,
            ..self
        }
    }

    /// Extend this `Config` with an explicit segment remap, flipping the image
    /// horizontally. See `SegmentRemap`.
    pub fn segment_remap(self, remap: SegmentRemap) -> Self {
        Self {
            segment_remap: remap,
            ..self
        }
    }

    /// Extend this `Config` with an explicit COM scan direction, flipping the image
    /// vertically. See `ComScanDirection`.
    pub fn com_scan_direction(self, direction: ComScanDirection) -> Self {
        Self {
            com_scan_direction: direction,
            ..self
        }
    }

    /// Extend this `Config` with an explicit COM pin wiring. See `ComPinConfig`.
    pub fn com_pin_config(self, config: ComPinConfig) -> Self {
        Self {
            com_pin_config: config,
            ..self
        }
    }

    /// Extend this `Config` with an explicit initial contrast current.
    pub fn contrast(self, contrast: u8) -> Self {
        Self { contrast, ..self }
    }

    /// Extend this `Config` with explicit precharge phase lengths. See
    /// `Command::SetPrechargePeriod`.
    pub fn precharge_phases(self, phase_1: u8, phase_2: u8) -> Self {
        Self {
            precharge_phases: (phase_1, phase_2),
            ..self
        }
    }

    /// Extend this `Config` with an explicit VCOMH deselect level register value.
    pub fn vcomh_deselect_level(self, level: u8) -> Self {
        Self {
            vcomh_deselect_level: level,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
