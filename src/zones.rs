//! Zone model: the single owned aggregate of per-zone state.
//!
//! A zone is one soil-moisture probe paired with one solenoid valve.
//! [`ZoneTable`] owns all four [`Zone`] records; every component borrows
//! it for the duration of a call and none keeps its own copy.

use core::fmt;

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::control::calibration::CalibrationModel;

/// Number of independently configured zones.
pub const ZONE_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Zone identity
// ---------------------------------------------------------------------------

/// Index of a zone, always in `0..ZONE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(u8);

impl ZoneId {
    /// Every zone, in evaluation order.
    pub const ALL: [Self; ZONE_COUNT] = [Self(0), Self(1), Self(2), Self(3)];

    /// `None` if `index` is not a valid zone.
    pub const fn new(index: usize) -> Option<Self> {
        if index < ZONE_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Zero-based index, also the probe's mux channel.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// One-based label printed on the panel ("R1", "T3", ...).
    pub const fn number(self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Zone record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    /// Fixed probe fit; never changed at runtime.
    pub calibration: CalibrationModel,
    /// Moisture (volumetric %) below which the zone counts as dry.
    pub threshold_percent: u16,
    /// Minutes the valve stays open once triggered.
    pub duration_min: u16,
    /// Set by the dryness evaluator, cleared when the valve closes.
    pub dry: bool,
}

// ---------------------------------------------------------------------------
// Dryness flags
// ---------------------------------------------------------------------------

/// Snapshot of the four dryness flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DryFlags([bool; ZONE_COUNT]);

impl DryFlags {
    pub const fn from_array(flags: [bool; ZONE_COUNT]) -> Self {
        Self(flags)
    }

    pub const fn is_dry(self, zone: ZoneId) -> bool {
        self.0[zone.index()]
    }

    pub fn set(&mut self, zone: ZoneId, dry: bool) {
        self.0[zone.index()] = dry;
    }

    pub fn any(self) -> bool {
        self.0.iter().any(|&d| d)
    }

    pub fn count(self) -> usize {
        self.0.iter().filter(|&&d| d).count()
    }

    /// Dry zones in index order.
    pub fn zones(self) -> Vec<ZoneId, ZONE_COUNT> {
        ZoneId::ALL.into_iter().filter(|&z| self.is_dry(z)).collect()
    }

    pub const fn as_array(self) -> [bool; ZONE_COUNT] {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Zone table
// ---------------------------------------------------------------------------

/// Owner of all four zone records.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTable {
    zones: [Zone; ZONE_COUNT],
}

impl ZoneTable {
    /// Build-time defaults from configuration; all zones start not dry.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            zones: config.zones.map(|z| Zone {
                calibration: z.calibration,
                threshold_percent: z.threshold_percent,
                duration_min: z.duration_min,
                dry: false,
            }),
        }
    }

    pub fn get(&self, zone: ZoneId) -> &Zone {
        &self.zones[zone.index()]
    }

    pub fn get_mut(&mut self, zone: ZoneId) -> &mut Zone {
        &mut self.zones[zone.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &Zone)> {
        ZoneId::ALL.into_iter().zip(self.zones.iter())
    }

    pub fn dry_flags(&self) -> DryFlags {
        DryFlags(self.zones.map(|z| z.dry))
    }

    pub fn thresholds(&self) -> [u16; ZONE_COUNT] {
        self.zones.map(|z| z.threshold_percent)
    }

    pub fn durations(&self) -> [u16; ZONE_COUNT] {
        self.zones.map(|z| z.duration_min)
    }

    pub fn clear_dry(&mut self) {
        for zone in &mut self.zones {
            zone.dry = false;
        }
    }
}
