use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, TimeZone, Utc};
use fit_model::{
    food::FoodItem,
    quantity::{QuantityType, Unit},
    sample::{Correlation, CorrelationType, QuantitySample, SampleQuery, METADATA_KEY_FOOD_TYPE},
};
use fit_store::{Error, HealthStore};
use log::{debug, error, info, warn};

use crate::day;

/// Foods logged during the local day, most recent first once added.
pub struct Journal {
    store: Arc<dyn HealthStore>,
    food_items: Vec<FoodItem>,
}

impl Journal {
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self {
            store,
            food_items: Vec::new(),
        }
    }

    pub fn food_items(&self) -> &[FoodItem] {
        &self.food_items
    }

    /// Replaces the list with the food correlations overlapping today.
    pub async fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<(), Error> {
        let today = day::today_predicate(now).ok_or(Error::RequestError)?;
        let samples = self
            .store
            .query(SampleQuery::new(CorrelationType::Food).with_predicate(today))
            .await?;

        self.food_items = samples
            .iter()
            .filter_map(|sample| match sample.as_correlation() {
                Some(correlation) => food_item_from_correlation(correlation),
                None => {
                    warn!("Expected a food correlation, got {:?}", sample.sample_type());
                    None
                }
            })
            .collect();
        info!("Loaded {} food items", self.food_items.len());
        Ok(())
    }

    /// Saves `food_item` as eaten at `now`. The list only changes once the
    /// store confirms the save.
    pub async fn add(&mut self, food_item: FoodItem, now: DateTime<Utc>) -> Result<(), Error> {
        let correlation = food_correlation(&food_item, now).ok_or(Error::RequestError)?;
        if let Err(e) = self.store.save(correlation.into()).await {
            error!("Failed to save {}: {}", food_item, e);
            return Err(e);
        }
        debug!("Saved {}", food_item);
        self.food_items.insert(0, food_item);
        Ok(())
    }
}

pub fn food_item_from_correlation(correlation: &Correlation) -> Option<FoodItem> {
    let Some(name) = correlation.metadata_value(METADATA_KEY_FOOD_TYPE) else {
        warn!("Food correlation {} has no food type, skipping", correlation.id);
        return None;
    };
    let Some(joules) = correlation
        .objects_for_type(QuantityType::DietaryEnergyConsumed)
        .next()
        .and_then(|sample| sample.quantity.value_in(Unit::Joule))
    else {
        warn!("Food correlation {} has no energy sample, skipping", correlation.id);
        return None;
    };
    Some(FoodItem::new(name, joules))
}

/// A food correlation holding a single dietary energy sample, both stamped
/// with `at`.
pub fn food_correlation(food_item: &FoodItem, at: DateTime<Utc>) -> Option<Correlation> {
    let energy = QuantitySample::new(
        QuantityType::DietaryEnergyConsumed,
        food_item.energy(),
        at,
        at,
    )?;
    let metadata = BTreeMap::from([(
        METADATA_KEY_FOOD_TYPE.to_string(),
        food_item.name().to_string(),
    )]);
    Some(Correlation::new(
        CorrelationType::Food,
        at,
        at,
        vec![energy],
        metadata,
    ))
}

#[cfg(test)]
mod tests {
    use fit_model::{
        quantity::Quantity,
        sample::{Sample, SampleType},
    };
    use fit_store::MockHealthStore;

    use super::*;

    fn breakfast_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 7, 30, 0).unwrap()
    }

    #[test]
    fn correlation_carries_name_and_energy() {
        let banana = FoodItem::new("Banana", 439320.0);

        let correlation = food_correlation(&banana, breakfast_time()).unwrap();

        assert_eq!(correlation.correlation_type, CorrelationType::Food);
        assert_eq!(correlation.start, breakfast_time());
        assert_eq!(correlation.end, breakfast_time());
        assert_eq!(correlation.metadata_value(METADATA_KEY_FOOD_TYPE), Some("Banana"));
        assert_eq!(food_item_from_correlation(&correlation), Some(banana));
    }

    #[test]
    fn reads_energy_in_joules() {
        let at = breakfast_time();
        let energy = QuantitySample::new(
            QuantityType::DietaryEnergyConsumed,
            Quantity::new(100.0, Unit::Kilocalorie),
            at,
            at,
        )
        .unwrap();
        let correlation = Correlation::new(
            CorrelationType::Food,
            at,
            at,
            vec![energy],
            BTreeMap::from([(METADATA_KEY_FOOD_TYPE.to_string(), "Oatmeal".to_string())]),
        );

        assert_eq!(
            food_item_from_correlation(&correlation),
            Some(FoodItem::new("Oatmeal", 418400.0))
        );
    }

    #[test]
    fn rejects_correlation_without_food_type() {
        let mut correlation =
            food_correlation(&FoodItem::new("Chips", 190000.0), breakfast_time()).unwrap();
        correlation.metadata.clear();

        assert_eq!(food_item_from_correlation(&correlation), None);
    }

    #[test]
    fn rejects_correlation_without_energy() {
        let mut correlation =
            food_correlation(&FoodItem::new("Chips", 190000.0), breakfast_time()).unwrap();
        correlation.objects.clear();

        assert_eq!(food_item_from_correlation(&correlation), None);
    }

    #[tokio::test]
    async fn refresh_skips_malformed_correlations() {
        let mut store = MockHealthStore::new();
        store
            .expect_query()
            .withf(|query| {
                query.sample_type == SampleType::Correlation(CorrelationType::Food)
                    && query.predicate.map_or(false, |p| !p.strict_start_date)
                    && query.limit.is_none()
            })
            .times(1)
            .returning(|_| {
                let at = breakfast_time();
                let bagel = FoodItem::new("Wheat Bagel", 240000.0);
                let banana = FoodItem::new("Banana", 439320.0);
                let bagel = food_correlation(&bagel, at).unwrap();
                let mut nameless = food_correlation(&banana, at).unwrap();
                nameless.metadata.clear();
                Ok(vec![Sample::from(bagel), Sample::from(nameless)])
            });
        let mut journal = Journal::new(Arc::new(store));

        journal
            .refresh(&Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap())
            .await
            .unwrap();

        assert_eq!(journal.food_items(), &[FoodItem::new("Wheat Bagel", 240000.0)]);
    }

    #[tokio::test]
    async fn add_puts_newest_item_first() {
        let mut store = MockHealthStore::new();
        store.expect_save().times(2).returning(|_| Ok(()));
        let mut journal = Journal::new(Arc::new(store));

        journal
            .add(FoodItem::new("Oatmeal", 150000.0), breakfast_time())
            .await
            .unwrap();
        journal
            .add(FoodItem::new("Banana", 439320.0), breakfast_time())
            .await
            .unwrap();

        assert_eq!(
            journal.food_items(),
            &[
                FoodItem::new("Banana", 439320.0),
                FoodItem::new("Oatmeal", 150000.0),
            ]
        );
    }

    #[tokio::test]
    async fn failed_save_leaves_list_unchanged() {
        let mut store = MockHealthStore::new();
        store
            .expect_save()
            .returning(|_| Err(Error::Authorization("food".to_string())));
        let mut journal = Journal::new(Arc::new(store));

        let result = journal
            .add(FoodItem::new("Chips", 190000.0), breakfast_time())
            .await;

        assert!(matches!(result, Err(Error::Authorization(_))));
        assert!(journal.food_items().is_empty());
    }
}
