use async_trait::async_trait;
use fit_model::{
    quantity::{Quantity, QuantityType},
    sample::{Sample, SampleQuery, SortOrder},
};
use log::debug;

use crate::store::{HealthStore, Result};

#[async_trait]
pub trait HealthStoreExt {
    /// Fetches the single most recent quantity of the given type.
    async fn most_recent_quantity(&self, quantity_type: QuantityType) -> Result<Option<Quantity>>;
}

#[async_trait]
impl<T: HealthStore + ?Sized> HealthStoreExt for T {
    async fn most_recent_quantity(&self, quantity_type: QuantityType) -> Result<Option<Quantity>> {
        let query = SampleQuery::new(quantity_type)
            .sorted(SortOrder::EndDateDescending)
            .with_limit(1);
        let samples = self.query(query).await?;
        let quantity = samples
            .first()
            .and_then(Sample::as_quantity)
            .map(|sample| sample.quantity);
        debug!("Most recent {}: {:?}", quantity_type, quantity);
        Ok(quantity)
    }
}
