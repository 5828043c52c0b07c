use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use fit_model::{
    characteristic::CharacteristicType,
    quantity::{Quantity, QuantityType, Unit},
    sample::{ObjectType, QuantitySample, SampleType},
};
use fit_store::{Error, HealthStore, HealthStoreExt};
use log::{info, warn};

use crate::day;

/// Every quantity the app records: energy eaten and burned, height and
/// body mass.
pub fn data_types_to_write() -> Vec<SampleType> {
    QuantityType::all().map(SampleType::from).collect()
}

pub fn data_types_to_read() -> Vec<ObjectType> {
    data_types_to_write()
        .into_iter()
        .map(ObjectType::from)
        .chain([
            ObjectType::from(CharacteristicType::DateOfBirth),
            ObjectType::from(CharacteristicType::BiologicalSex),
        ])
        .collect()
}

/// The user's body characteristics as kept in the health store.
pub struct Profile {
    store: Arc<dyn HealthStore>,
}

impl Profile {
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    /// Asks for access to every type the app reads or writes. Returns
    /// `false` when the user refuses.
    pub async fn authorize(&self) -> Result<bool, Error> {
        let granted = self
            .store
            .request_authorization(&data_types_to_write(), &data_types_to_read())
            .await?;
        if granted {
            info!("Health store access granted");
        } else {
            warn!("Health store access was not granted");
        }
        Ok(granted)
    }

    pub async fn age(&self, today: NaiveDate) -> Result<Option<u32>, Error> {
        Ok(self
            .store
            .date_of_birth()
            .await?
            .map(|date_of_birth| day::age_in_years(date_of_birth, today)))
    }

    pub async fn height_inches(&self) -> Result<Option<f64>, Error> {
        self.most_recent_in(QuantityType::Height, Unit::Inch).await
    }

    pub async fn weight_pounds(&self) -> Result<Option<f64>, Error> {
        self.most_recent_in(QuantityType::BodyMass, Unit::Pound).await
    }

    pub async fn save_height_inches(&self, inches: f64, now: DateTime<Utc>) -> Result<(), Error> {
        self.save_quantity(QuantityType::Height, Quantity::new(inches, Unit::Inch), now)
            .await
    }

    pub async fn save_weight_pounds(&self, pounds: f64, now: DateTime<Utc>) -> Result<(), Error> {
        self.save_quantity(QuantityType::BodyMass, Quantity::new(pounds, Unit::Pound), now)
            .await
    }

    async fn most_recent_in(
        &self,
        quantity_type: QuantityType,
        unit: Unit,
    ) -> Result<Option<f64>, Error> {
        Ok(self
            .store
            .most_recent_quantity(quantity_type)
            .await?
            .and_then(|quantity| quantity.value_in(unit)))
    }

    async fn save_quantity(
        &self,
        quantity_type: QuantityType,
        quantity: Quantity,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let sample =
            QuantitySample::new(quantity_type, quantity, now, now).ok_or(Error::RequestError)?;
        info!("Saving {} of {}", quantity_type, quantity);
        self.store.save(sample.into()).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use fit_model::sample::{Sample, SortOrder};
    use fit_store::MockHealthStore;

    use super::*;

    fn sample_of(quantity_type: QuantityType, quantity: Quantity) -> Sample {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        QuantitySample::new(quantity_type, quantity, at, at)
            .unwrap()
            .into()
    }

    #[test]
    fn reads_everything_it_writes() {
        let to_write = data_types_to_write();
        let to_read = data_types_to_read();

        assert_eq!(to_write.len(), 4);
        assert!(to_write.contains(&SampleType::from(QuantityType::Height)));
        assert!(to_write.contains(&SampleType::from(QuantityType::ActiveEnergyBurned)));
        assert_eq!(to_read.len(), 6);
        assert!(to_write
            .iter()
            .all(|sample_type| to_read.contains(&ObjectType::from(*sample_type))));
        assert!(to_read.contains(&ObjectType::from(CharacteristicType::BiologicalSex)));
    }

    #[tokio::test]
    async fn refused_authorization_is_not_an_error() {
        let mut store = MockHealthStore::new();
        store
            .expect_request_authorization()
            .withf(|to_share, to_read| to_share.len() == 4 && to_read.len() == 6)
            .returning(|_, _| Ok(false));
        let profile = Profile::new(Arc::new(store));

        assert!(!profile.authorize().await.unwrap());
    }

    #[tokio::test]
    async fn age_is_absent_without_date_of_birth() {
        let mut store = MockHealthStore::new();
        store.expect_date_of_birth().returning(|| Ok(None));
        let profile = Profile::new(Arc::new(store));

        let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        assert_eq!(profile.age(today).await.unwrap(), None);
    }

    #[tokio::test]
    async fn age_counts_whole_years() {
        let mut store = MockHealthStore::new();
        store
            .expect_date_of_birth()
            .returning(|| Ok(NaiveDate::from_ymd_opt(1990, 6, 15)));
        let profile = Profile::new(Arc::new(store));

        let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        assert_eq!(profile.age(today).await.unwrap(), Some(33));
    }

    #[tokio::test]
    async fn converts_stored_values_to_imperial_units() {
        let mut store = MockHealthStore::new();
        store
            .expect_query()
            .withf(|query| {
                query.sample_type == SampleType::Quantity(QuantityType::Height)
                    && query.sort == Some(SortOrder::EndDateDescending)
            })
            .returning(|_| {
                Ok(vec![sample_of(
                    QuantityType::Height,
                    Quantity::new(1.778, Unit::Meter),
                )])
            });
        store
            .expect_query()
            .withf(|query| query.sample_type == SampleType::Quantity(QuantityType::BodyMass))
            .returning(|_| Ok(vec![]));
        store.expect_biological_sex().never();
        let profile = Profile::new(Arc::new(store));

        let height = profile.height_inches().await.unwrap().unwrap();
        assert!((height - 70.0).abs() < 1e-9);
        assert_eq!(profile.weight_pounds().await.unwrap(), None);
    }

    #[tokio::test]
    async fn saves_instantaneous_sample() {
        let now = Utc.with_ymd_and_hms(2024, 5, 14, 8, 15, 0).unwrap();
        let mut store = MockHealthStore::new();
        store
            .expect_save()
            .withf(move |sample| match sample {
                Sample::Quantity(sample) => {
                    sample.quantity_type == QuantityType::BodyMass
                        && sample.quantity == Quantity::new(154.0, Unit::Pound)
                        && sample.start == now
                        && sample.end == now
                }
                Sample::Correlation(_) => false,
            })
            .times(1)
            .returning(|_| Ok(()));
        let profile = Profile::new(Arc::new(store));

        profile.save_weight_pounds(154.0, now).await.unwrap();
    }

    #[tokio::test]
    async fn save_failure_is_returned() {
        let mut store = MockHealthStore::new();
        store
            .expect_save()
            .returning(|_| Err(Error::InternalServerError));
        let profile = Profile::new(Arc::new(store));

        let result = profile
            .save_height_inches(70.0, Utc.with_ymd_and_hms(2024, 5, 14, 8, 0, 0).unwrap())
            .await;

        assert!(matches!(result, Err(Error::InternalServerError)));
    }
}
