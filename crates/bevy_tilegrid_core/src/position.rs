//! Grid positions and their canonical string keys

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a position key is not in `x,y,z` form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position key '{0}' must have exactly three components")]
    WrongArity(String),
    #[error("position key '{key}' has a non-integer component '{component}'")]
    NotAnInteger { key: String, component: String },
}

/// A cell on the map grid.
///
/// `x` is the east-west component, `y` north-south and `z` the layer index.
/// Equality and hashing are value based, which makes them agree with the
/// canonical `"x,y,z"` key: two positions are equal iff their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// The canonical `"x,y,z"` key
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split(',').collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(PositionError::WrongArity(key.to_string()));
        };

        let component = |raw: &str| {
            raw.trim()
                .parse::<i32>()
                .map_err(|_| PositionError::NotAnInteger {
                    key: key.to_string(),
                    component: raw.to_string(),
                })
        };

        Ok(Self::new(component(*x)?, component(*y)?, component(*z)?))
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
