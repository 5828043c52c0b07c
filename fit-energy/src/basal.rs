//! Basal (resting) energy burn.
//!
//! The estimate uses the Harris-Benedict equations, prorated by how much
//! of the local day has passed.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone};
use fit_model::{
    characteristic::BiologicalSex,
    quantity::{Quantity, QuantityType, Unit},
};
use fit_store::{HealthStore, HealthStoreExt};
use log::{debug, info};

use crate::day;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Input {
    Weight,
    Height,
    DateOfBirth,
    BiologicalSex,
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Weight => write!(f, "weight"),
            Input::Height => write!(f, "height"),
            Input::DateOfBirth => write!(f, "date of birth"),
            Input::BiologicalSex => write!(f, "biological sex"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BasalBurnError {
    #[error("{0} is not available")]
    MissingInput(Input),
    #[error("health store failure: {0}")]
    StoreFailure(#[from] fit_store::Error),
}

/// Everything the estimate depends on, as read from the health store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasalInputs {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub date_of_birth: NaiveDate,
    pub sex: BiologicalSex,
}

/// Basal metabolic rate in kilocalories per day. Results are not clamped
/// and can be negative for extreme inputs.
pub fn basal_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: BiologicalSex,
) -> f64 {
    let age = f64::from(age_years);
    match sex {
        BiologicalSex::Male => 66.0 + (13.8 * weight_kg) + (5.0 * height_cm) - (6.8 * age),
        // TODO: pick an equation for Other instead of reusing the female one.
        BiologicalSex::Female | BiologicalSex::Other => {
            655.0 + (9.6 * weight_kg) + (1.8 * height_cm) - (4.7 * age)
        }
    }
}

/// Kilocalories burned at rest between local midnight and `now`.
pub fn estimate_basal_burn_so_far_today<Tz: TimeZone>(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: BiologicalSex,
    now: &DateTime<Tz>,
) -> f64 {
    basal_metabolic_rate(weight_kg, height_cm, age_years, sex) * day::fraction_of_day_elapsed(now)
}

/// Reads weight, height, date of birth and biological sex, in that order.
/// Stops at the first lookup that fails or comes back empty.
pub async fn fetch_basal_inputs(store: &dyn HealthStore) -> Result<BasalInputs, BasalBurnError> {
    let weight_kg = store
        .most_recent_quantity(QuantityType::BodyMass)
        .await?
        .and_then(|weight| weight.value_in(Unit::Kilogram))
        .ok_or(BasalBurnError::MissingInput(Input::Weight))?;

    let height_cm = store
        .most_recent_quantity(QuantityType::Height)
        .await?
        .and_then(|height| height.value_in(Unit::Centimeter))
        .ok_or(BasalBurnError::MissingInput(Input::Height))?;

    let date_of_birth = store
        .date_of_birth()
        .await?
        .ok_or(BasalBurnError::MissingInput(Input::DateOfBirth))?;

    let sex = store
        .biological_sex()
        .await?
        .ok_or(BasalBurnError::MissingInput(Input::BiologicalSex))?;

    Ok(BasalInputs {
        weight_kg,
        height_cm,
        date_of_birth,
        sex,
    })
}

/// Basal energy burned so far today, in kilocalories.
pub async fn fetch_basal_burn<Tz: TimeZone>(
    store: &dyn HealthStore,
    now: &DateTime<Tz>,
) -> Result<Quantity, BasalBurnError> {
    let inputs = fetch_basal_inputs(store).await?;
    debug!("Basal burn inputs: {:?}", inputs);

    let age_years = day::age_in_years(inputs.date_of_birth, now.date_naive());
    let kilocalories = estimate_basal_burn_so_far_today(
        inputs.weight_kg,
        inputs.height_cm,
        age_years,
        inputs.sex,
        now,
    );
    info!("Basal energy burned so far today: {:.2} kcal", kilocalories);

    Ok(Quantity::new(kilocalories, Unit::Kilocalorie))
}
