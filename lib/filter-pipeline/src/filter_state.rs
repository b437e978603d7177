//! Filter parameters and the validated update gate

use crate::{FilterError, FilterResult, pixel_buffer::Channel};
use derivative::Derivative;
use std::str::FromStr;
use strum::VariantArray as _;
use strum_macros::{AsRefStr, Display, EnumString, VariantArray};

pub const MIN_OFFSET: i32 = -255;
pub const MAX_OFFSET: i32 = 255;

/// Adjustable filter, in pipeline application order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
#[strum(serialize_all = "camelCase")]
pub enum FilterParameter {
    RedChannel,
    GreenChannel,
    BlueChannel,
    Brightness,
    Grayscale,
}

impl FilterParameter {
    pub fn all() -> &'static [FilterParameter] {
        FilterParameter::VARIANTS
    }

    /// Parameters that carry a signed offset and own a display label
    pub fn numeric() -> impl Iterator<Item = FilterParameter> {
        Self::all().iter().copied().filter(|p| p.is_numeric())
    }

    pub fn is_numeric(self) -> bool {
        self != FilterParameter::Grayscale
    }

    pub fn channel(self) -> Option<Channel> {
        match self {
            FilterParameter::RedChannel => Some(Channel::Red),
            FilterParameter::GreenChannel => Some(Channel::Green),
            FilterParameter::BlueChannel => Some(Channel::Blue),
            _ => None,
        }
    }

    pub fn parse(name: &str) -> FilterResult<Self> {
        FilterParameter::from_str(name).map_err(|_| FilterError::InvalidParameter(name.to_string()))
    }
}

/// Untyped value as delivered by an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Number(f64),
    Bool(bool),
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// A validated value ready to be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    RedChannel(i32),
    GreenChannel(i32),
    BlueChannel(i32),
    Brightness(i32),
    Grayscale(bool),
}

impl FilterChange {
    pub fn parameter(self) -> FilterParameter {
        match self {
            FilterChange::RedChannel(_) => FilterParameter::RedChannel,
            FilterChange::GreenChannel(_) => FilterParameter::GreenChannel,
            FilterChange::BlueChannel(_) => FilterParameter::BlueChannel,
            FilterChange::Brightness(_) => FilterParameter::Brightness,
            FilterChange::Grayscale(_) => FilterParameter::Grayscale,
        }
    }

    pub fn value(self) -> RawValue {
        match self {
            FilterChange::RedChannel(amount)
            | FilterChange::GreenChannel(amount)
            | FilterChange::BlueChannel(amount)
            | FilterChange::Brightness(amount) => RawValue::from(amount),
            FilterChange::Grayscale(on) => RawValue::Bool(on),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Derivative)]
#[derivative(Default)]
pub struct FilterState {
    #[derivative(Default(value = "0"))]
    red_channel: i32,

    #[derivative(Default(value = "0"))]
    green_channel: i32,

    #[derivative(Default(value = "0"))]
    blue_channel: i32,

    #[derivative(Default(value = "0"))]
    brightness: i32,

    #[derivative(Default(value = "false"))]
    grayscale: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, parameter: FilterParameter) -> RawValue {
        match parameter {
            FilterParameter::Grayscale => RawValue::Bool(self.grayscale),
            _ => RawValue::Number(self.amount(parameter) as f64),
        }
    }

    /// Offset carried by `parameter`. Grayscale has no offset and yields 0.
    pub fn amount(&self, parameter: FilterParameter) -> i32 {
        match parameter {
            FilterParameter::RedChannel => self.red_channel,
            FilterParameter::GreenChannel => self.green_channel,
            FilterParameter::BlueChannel => self.blue_channel,
            FilterParameter::Brightness => self.brightness,
            FilterParameter::Grayscale => 0,
        }
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }

    /// Check `value` against `parameter` without touching the state and
    /// return the change it would make
    pub fn validate(
        &self,
        parameter: FilterParameter,
        value: Option<RawValue>,
    ) -> FilterResult<FilterChange> {
        let Some(value) = value else {
            return Err(FilterError::MissingValue(parameter));
        };

        let change = match (parameter, value) {
            (FilterParameter::Grayscale, RawValue::Bool(on)) => FilterChange::Grayscale(on),
            (FilterParameter::RedChannel, RawValue::Number(v)) => {
                FilterChange::RedChannel(Self::offset_from(parameter, v)?)
            }
            (FilterParameter::GreenChannel, RawValue::Number(v)) => {
                FilterChange::GreenChannel(Self::offset_from(parameter, v)?)
            }
            (FilterParameter::BlueChannel, RawValue::Number(v)) => {
                FilterChange::BlueChannel(Self::offset_from(parameter, v)?)
            }
            (FilterParameter::Brightness, RawValue::Number(v)) => {
                FilterChange::Brightness(Self::offset_from(parameter, v)?)
            }
            (FilterParameter::Grayscale, RawValue::Number(_)) => {
                return Err(FilterError::TypeMismatch {
                    parameter,
                    expected: "boolean",
                });
            }
            (_, RawValue::Bool(_)) => {
                return Err(FilterError::TypeMismatch {
                    parameter,
                    expected: "integer",
                });
            }
        };

        if change.value() == self.get(parameter) {
            return Err(FilterError::NoOpIgnored(parameter));
        }

        Ok(change)
    }

    /// Validate then store `value`. On error the state is left untouched.
    pub fn update(
        &mut self,
        parameter: FilterParameter,
        value: Option<RawValue>,
    ) -> FilterResult<FilterChange> {
        let change = self.validate(parameter, value)?;

        match change {
            FilterChange::RedChannel(amount) => self.red_channel = amount,
            FilterChange::GreenChannel(amount) => self.green_channel = amount,
            FilterChange::BlueChannel(amount) => self.blue_channel = amount,
            FilterChange::Brightness(amount) => self.brightness = amount,
            FilterChange::Grayscale(on) => self.grayscale = on,
        }

        Ok(change)
    }

    pub fn update_by_name(&mut self, name: &str, value: Option<RawValue>) -> FilterResult<FilterParameter> {
        let parameter = FilterParameter::parse(name)?;
        Ok(self.update(parameter, value)?.parameter())
    }

    fn offset_from(parameter: FilterParameter, value: f64) -> FilterResult<i32> {
        if !value.is_finite() {
            return Err(FilterError::TypeMismatch {
                parameter,
                expected: "integer",
            });
        }

        if value < MIN_OFFSET as f64 || value > MAX_OFFSET as f64 {
            return Err(FilterError::OutOfRange { parameter, value });
        }

        if value.fract() != 0.0 {
            return Err(FilterError::TypeMismatch {
                parameter,
                expected: "integer",
            });
        }

        Ok(value as i32)
    }
}
