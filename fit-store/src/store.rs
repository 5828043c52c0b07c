use async_trait::async_trait;
use chrono::NaiveDate;
use fit_model::{
    characteristic::BiologicalSex,
    sample::{ObjectType, Sample, SampleQuery, SampleType},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("access to {0} was not authorized")]
    Authorization(String),
    #[error("health store unreachable")]
    CommunicationError,
    #[error("health store internal error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect health store response")]
    ResponseError,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Health data store holding samples and the user's characteristics.
///
/// Absence of a characteristic is `Ok(None)`, never an error.
#[mockall::automock]
#[async_trait]
pub trait HealthStore: Send + Sync {
    async fn request_authorization(
        &self,
        to_share: &[SampleType],
        to_read: &[ObjectType],
    ) -> Result<bool>;
    async fn date_of_birth(&self) -> Result<Option<NaiveDate>>;
    async fn biological_sex(&self) -> Result<Option<BiologicalSex>>;
    async fn save(&self, sample: Sample) -> Result<()>;
    async fn query(&self, query: SampleQuery) -> Result<Vec<Sample>>;
}
