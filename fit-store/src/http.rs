use async_trait::async_trait;
use chrono::NaiveDate;
use fit_model::{
    characteristic::BiologicalSex,
    sample::{ObjectType, Sample, SampleQuery, SampleType},
};
use itertools::Itertools;
use log::debug;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::store::{Error, HealthStore, Result};

const AUTHORIZATION_PATH: &str = "authorization";
const DATE_OF_BIRTH_PATH: &str = "characteristics/date-of-birth";
const BIOLOGICAL_SEX_PATH: &str = "characteristics/biological-sex";
const SAMPLES_PATH: &str = "samples";
const QUERY_PATH: &str = "samples/query";

#[derive(Serialize)]
struct AuthorizationRequest<'a> {
    share: &'a [SampleType],
    read: &'a [ObjectType],
}

#[derive(Debug, Deserialize)]
struct AuthorizationResponse {
    granted: bool,
}

/// Health store reached over its JSON HTTP interface.
pub struct HttpHealthStore {
    url: String,
    client: reqwest::Client,
}

impl HttpHealthStore {
    fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| check_status(path, resp.status()).map(|_| resp))?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        self.client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| check_status(path, resp.status()).map(|_| resp))
    }
}

pub fn create(url: String) -> impl HealthStore {
    HttpHealthStore::new(url)
}

fn check_status(path: &str, status: StatusCode) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(Error::Authorization(path.to_owned()))
    } else if status.is_client_error() {
        Err(Error::RequestError)
    } else if status.is_server_error() {
        Err(Error::InternalServerError)
    } else {
        Ok(())
    }
}

#[async_trait]
impl HealthStore for HttpHealthStore {
    async fn request_authorization(
        &self,
        to_share: &[SampleType],
        to_read: &[ObjectType],
    ) -> Result<bool> {
        debug!(
            "Requesting authorization to share [{}] and read [{}]",
            to_share.iter().map(|t| format!("{:?}", t)).join(","),
            to_read.iter().map(|t| format!("{:?}", t)).join(","),
        );
        let request = AuthorizationRequest {
            share: to_share,
            read: to_read,
        };
        self.post(AUTHORIZATION_PATH, &request)
            .await?
            .json::<AuthorizationResponse>()
            .await
            .map(|resp| resp.granted)
            .map_err(|_| Error::ResponseError)
    }

    async fn date_of_birth(&self) -> Result<Option<NaiveDate>> {
        self.get_json(DATE_OF_BIRTH_PATH).await
    }

    async fn biological_sex(&self) -> Result<Option<BiologicalSex>> {
        self.get_json(BIOLOGICAL_SEX_PATH).await
    }

    async fn save(&self, sample: Sample) -> Result<()> {
        debug!("Saving {:?} sample", sample.sample_type());
        self.post(SAMPLES_PATH, &sample).await?;
        Ok(())
    }

    async fn query(&self, query: SampleQuery) -> Result<Vec<Sample>> {
        self.post(QUERY_PATH, &query)
            .await?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }
}
