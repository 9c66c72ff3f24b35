//! Value types shared by both protocol models.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

// ---------------------------------------------------------------------------
// Vec3 (f32 x, y, z)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Build from Java's double-precision coordinates.
    pub fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self::new(x as f32, y as f32, z as f32)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// BlockPos (i32 x, y, z)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Uuid
// ---------------------------------------------------------------------------

/// 128-bit UUID split into its two 64-bit halves, as both editions carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Uuid {
    pub most_significant: u64,
    pub least_significant: u64,
}

impl Uuid {
    pub const ZERO: Self = Self {
        most_significant: 0,
        least_significant: 0,
    };

    pub fn new(most: u64, least: u64) -> Self {
        Self {
            most_significant: most,
            least_significant: least,
        }
    }

    /// Build from 16 big-endian bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut most = [0u8; 8];
        let mut least = [0u8; 8];
        most.copy_from_slice(&bytes[..8]);
        least.copy_from_slice(&bytes[8..]);
        Self::new(u64::from_be_bytes(most), u64::from_be_bytes(least))
    }

    /// Parse the hyphenated form (`8-4-4-4-12`) or the bare 32-digit form.
    pub fn parse(input: &str) -> Result<Self, ProtoError> {
        let hex: String = input.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 {
            return Err(ProtoError::InvalidUuid(input.to_owned()));
        }
        let most = u64::from_str_radix(&hex[..16], 16)
            .map_err(|_| ProtoError::InvalidUuid(input.to_owned()))?;
        let least = u64::from_str_radix(&hex[16..], 16)
            .map_err(|_| ProtoError::InvalidUuid(input.to_owned()))?;
        Ok(Self::new(most, least))
    }
}

impl FromStr for Uuid {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let most = self.most_significant;
        let least = self.least_significant;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            most >> 32,
            (most >> 16) & 0xFFFF,
            most & 0xFFFF,
            least >> 48,
            least & 0xFFFF_FFFF_FFFF,
        )
    }
}
