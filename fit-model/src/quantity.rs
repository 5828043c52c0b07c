use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
pub const GRAMS_PER_POUND: f64 = 453.592_37;
pub const METERS_PER_CENTIMETER: f64 = 0.01;
pub const METERS_PER_INCH: f64 = 0.0254;
pub const JOULES_PER_KILOJOULE: f64 = 1000.0;
pub const JOULES_PER_KILOCALORIE: f64 = 4184.0;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dimension {
    Mass,
    Length,
    Energy,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Unit {
    Gram,
    Kilogram,
    Pound,
    Centimeter,
    Meter,
    Inch,
    Joule,
    Kilojoule,
    Kilocalorie,
}

impl Unit {
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Pound => Dimension::Mass,
            Unit::Centimeter | Unit::Meter | Unit::Inch => Dimension::Length,
            Unit::Joule | Unit::Kilojoule | Unit::Kilocalorie => Dimension::Energy,
        }
    }

    /// Size of one unit expressed in the base unit of its dimension
    /// (grams, meters or joules).
    fn base_factor(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => GRAMS_PER_KILOGRAM,
            Unit::Pound => GRAMS_PER_POUND,
            Unit::Centimeter => METERS_PER_CENTIMETER,
            Unit::Meter => 1.0,
            Unit::Inch => METERS_PER_INCH,
            Unit::Joule => 1.0,
            Unit::Kilojoule => JOULES_PER_KILOJOULE,
            Unit::Kilocalorie => JOULES_PER_KILOCALORIE,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Pound => "lb",
            Unit::Centimeter => "cm",
            Unit::Meter => "m",
            Unit::Inch => "in",
            Unit::Joule => "J",
            Unit::Kilojoule => "kJ",
            Unit::Kilocalorie => "kcal",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn is_compatible_with(&self, unit: Unit) -> bool {
        self.unit.dimension() == unit.dimension()
    }

    /// Magnitude of this quantity in `unit`, or `None` when the units
    /// measure different dimensions.
    pub fn value_in(&self, unit: Unit) -> Option<f64> {
        if !self.is_compatible_with(unit) {
            return None;
        }
        if self.unit == unit {
            return Some(self.value);
        }
        Some(self.value * self.unit.base_factor() / unit.base_factor())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuantityType {
    DietaryEnergyConsumed,
    ActiveEnergyBurned,
    BodyMass,
    Height,
}

impl QuantityType {
    pub fn all() -> impl Iterator<Item = QuantityType> {
        QuantityType::iter()
    }

    pub fn canonical_unit(&self) -> Unit {
        match self {
            QuantityType::DietaryEnergyConsumed | QuantityType::ActiveEnergyBurned => Unit::Joule,
            QuantityType::BodyMass => Unit::Kilogram,
            QuantityType::Height => Unit::Centimeter,
        }
    }

    pub fn accepts(&self, quantity: &Quantity) -> bool {
        quantity.is_compatible_with(self.canonical_unit())
    }
}

impl fmt::Display for QuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
