use chrono::{DateTime, TimeZone};
use fit_model::{
    quantity::{QuantityType, Unit},
    sample::{Sample, SamplePredicate, SampleQuery},
};
use fit_store::{Error, HealthStore};
use log::{debug, warn};
use serde::Serialize;

use crate::{
    basal::{self, BasalBurnError},
    day,
};

/// Energy consumed and burned during the local day, in joules.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnergySummary {
    pub consumed_joules: f64,
    pub active_burned_joules: f64,
    pub resting_burned_joules: Option<f64>,
}

impl EnergySummary {
    /// Energy balance for the day. Unknown when the resting burn could not
    /// be estimated.
    pub fn net_joules(&self) -> Option<f64> {
        self.resting_burned_joules
            .map(|resting| self.consumed_joules - self.active_burned_joules - resting)
    }

    pub async fn fetch<Tz: TimeZone>(
        store: &dyn HealthStore,
        now: &DateTime<Tz>,
    ) -> Result<Self, Error> {
        let today = day::today_predicate(now)
            .ok_or(Error::RequestError)?
            .strict_start_date();

        let (consumed_joules, active_burned_joules) = futures::try_join!(
            sum_of_samples(store, QuantityType::DietaryEnergyConsumed, today),
            sum_of_samples(store, QuantityType::ActiveEnergyBurned, today),
        )?;

        let resting_burned_joules = match basal::fetch_basal_burn(store, now).await {
            Ok(burn) => burn.value_in(Unit::Joule),
            Err(BasalBurnError::MissingInput(input)) => {
                warn!(
                    "Cannot estimate basal energy burn, {} is not available",
                    input
                );
                None
            }
            Err(BasalBurnError::StoreFailure(e)) => return Err(e),
        };

        Ok(Self {
            consumed_joules,
            active_burned_joules,
            resting_burned_joules,
        })
    }
}

async fn sum_of_samples(
    store: &dyn HealthStore,
    quantity_type: QuantityType,
    predicate: SamplePredicate,
) -> Result<f64, Error> {
    let samples = store
        .query(SampleQuery::new(quantity_type).with_predicate(predicate))
        .await?;
    let sum = samples
        .iter()
        .filter_map(Sample::as_quantity)
        .filter_map(|sample| sample.quantity.value_in(Unit::Joule))
        .sum();
    debug!("Sum of {} samples today: {} J", quantity_type, sum);
    Ok(sum)
}
