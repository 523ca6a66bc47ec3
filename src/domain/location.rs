// Location domain model
use std::fmt;

pub const DEFAULT_LATITUDE: f64 = 51.10;
pub const DEFAULT_LONGITUDE: f64 = 17.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Inclusive valid range in decimal degrees
    pub fn range(self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }

    pub fn validate(self, value: f64) -> Result<f64, ValidationError> {
        let (min, max) = self.range();
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ValidationError::OutOfRange {
                axis: self,
                value,
                min,
                max,
            })
        }
    }

    /// Parse operator text as a decimal and range-check it
    pub fn parse(self, input: &str) -> Result<f64, ValidationError> {
        let trimmed = input.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ValidationError::NotNumeric {
                axis: self,
                input: trimmed.to_string(),
            })?;
        self.validate(value)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{axis} {value} is out of range [{min}, {max}]")]
    OutOfRange {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{axis} `{input}` is not a number")]
    NotNumeric { axis: Axis, input: String },
}

/// A validated latitude/longitude pair. Only constructible from in-range values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: Axis::Latitude.validate(latitude)?,
            longitude: Axis::Longitude.validate(longitude)?,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Copy of this coordinate with one axis replaced
    pub fn with_axis(self, axis: Axis, value: f64) -> Result<Self, ValidationError> {
        match axis {
            Axis::Latitude => Self::new(value, self.longitude),
            Axis::Longitude => Self::new(self.latitude, value),
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.latitude, self.longitude)
    }
}
