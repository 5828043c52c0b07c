use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use uuid::Uuid;

use crate::characteristic::CharacteristicType;
use crate::quantity::{Quantity, QuantityType};

/// Metadata key under which a food correlation stores the name of the food.
pub const METADATA_KEY_FOOD_TYPE: &str = "FoodType";

#[derive(AsRefStr, Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CorrelationType {
    Food,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleType {
    Quantity(QuantityType),
    Correlation(CorrelationType),
}

impl From<QuantityType> for SampleType {
    fn from(quantity_type: QuantityType) -> Self {
        SampleType::Quantity(quantity_type)
    }
}

impl From<CorrelationType> for SampleType {
    fn from(correlation_type: CorrelationType) -> Self {
        SampleType::Correlation(correlation_type)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectType {
    Sample(SampleType),
    Characteristic(CharacteristicType),
}

impl From<SampleType> for ObjectType {
    fn from(sample_type: SampleType) -> Self {
        ObjectType::Sample(sample_type)
    }
}

impl From<QuantityType> for ObjectType {
    fn from(quantity_type: QuantityType) -> Self {
        ObjectType::Sample(quantity_type.into())
    }
}

impl From<CharacteristicType> for ObjectType {
    fn from(characteristic_type: CharacteristicType) -> Self {
        ObjectType::Characteristic(characteristic_type)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuantitySample {
    pub id: Uuid,
    pub quantity_type: QuantityType,
    pub quantity: Quantity,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QuantitySample {
    /// Returns `None` if the quantity's unit does not measure what
    /// `quantity_type` describes.
    pub fn new(
        quantity_type: QuantityType,
        quantity: Quantity,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Option<Self> {
        if !quantity_type.accepts(&quantity) {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            quantity_type,
            quantity,
            start,
            end,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correlation {
    pub id: Uuid,
    pub correlation_type: CorrelationType,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub objects: Vec<QuantitySample>,
    pub metadata: BTreeMap<String, String>,
}

impl Correlation {
    pub fn new(
        correlation_type: CorrelationType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        objects: Vec<QuantitySample>,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            correlation_type,
            start,
            end,
            objects,
            metadata,
        }
    }

    pub fn objects_for_type(
        &self,
        quantity_type: QuantityType,
    ) -> impl Iterator<Item = &QuantitySample> {
        self.objects
            .iter()
            .filter(move |sample| sample.quantity_type == quantity_type)
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sample {
    Quantity(QuantitySample),
    Correlation(Correlation),
}

impl Sample {
    pub fn sample_type(&self) -> SampleType {
        match self {
            Sample::Quantity(sample) => SampleType::Quantity(sample.quantity_type),
            Sample::Correlation(correlation) => {
                SampleType::Correlation(correlation.correlation_type)
            }
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        match self {
            Sample::Quantity(sample) => sample.start,
            Sample::Correlation(correlation) => correlation.start,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        match self {
            Sample::Quantity(sample) => sample.end,
            Sample::Correlation(correlation) => correlation.end,
        }
    }

    pub fn as_quantity(&self) -> Option<&QuantitySample> {
        match self {
            Sample::Quantity(sample) => Some(sample),
            Sample::Correlation(_) => None,
        }
    }

    pub fn as_correlation(&self) -> Option<&Correlation> {
        match self {
            Sample::Quantity(_) => None,
            Sample::Correlation(correlation) => Some(correlation),
        }
    }
}

impl From<QuantitySample> for Sample {
    fn from(sample: QuantitySample) -> Self {
        Sample::Quantity(sample)
    }
}

impl From<Correlation> for Sample {
    fn from(correlation: Correlation) -> Self {
        Sample::Correlation(correlation)
    }
}

/// Date interval filter applied by the store.
///
/// Without strict options a sample matches when it overlaps `[start, end)`:
/// it must begin before `end` and reach past `start`. A sample ending exactly
/// at `start` belongs to the previous interval, unless it is instantaneous.
/// `strict_start_date` requires the sample to start within `[start, end)`;
/// `strict_end_date` requires it to end within `(start, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplePredicate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strict_start_date: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strict_end_date: bool,
}

impl SamplePredicate {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            strict_start_date: false,
            strict_end_date: false,
        }
    }

    pub fn strict_start_date(mut self) -> Self {
        self.strict_start_date = true;
        self
    }

    pub fn strict_end_date(mut self) -> Self {
        self.strict_end_date = true;
        self
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        let (start, end) = (sample.start(), sample.end());
        if self.strict_start_date && !(self.start <= start && start < self.end) {
            return false;
        }
        if self.strict_end_date && !(self.start < end && end <= self.end) {
            return false;
        }
        start < self.end && (end > self.start || start >= self.start)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortOrder {
    EndDateAscending,
    EndDateDescending,
}

#[cfg_attr(feature = "serde", serde_with::skip_serializing_none)]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleQuery {
    pub sample_type: SampleType,
    pub predicate: Option<SamplePredicate>,
    pub sort: Option<SortOrder>,
    pub limit: Option<usize>,
}

impl SampleQuery {
    pub fn new(sample_type: impl Into<SampleType>) -> Self {
        Self {
            sample_type: sample_type.into(),
            predicate: None,
            sort: None,
            limit: None,
        }
    }

    pub fn with_predicate(mut self, predicate: SamplePredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
