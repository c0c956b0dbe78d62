use crate::config::ClientConfig;
use crate::errors::TransportFailure;
use crate::models::{DayResponse, DaySnapshot, HabitId};
use chrono::NaiveDate;
use reqwest::{Client, Response, Url};
use std::future::Future;
use tracing::debug;

/// The remote side of the day screen.
pub trait HabitService: Send + Sync + 'static {
    fn fetch_day(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<DaySnapshot, TransportFailure>> + Send;

    fn toggle_habit(
        &self,
        habit_id: &HabitId,
    ) -> impl Future<Output = Result<(), TransportFailure>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpHabitService {
    base_url: Url,
    http: Client,
}

impl HttpHabitService {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportFailure> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|err| {
            TransportFailure::new(format!("invalid base url {:?}: {err}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TransportFailure::new(format!(
                "base url {:?} cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportFailure::new("base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl HabitService for HttpHabitService {
    async fn fetch_day(&self, date: NaiveDate) -> Result<DaySnapshot, TransportFailure> {
        let url = self.endpoint(&["day"])?;
        let date = date.format("%Y-%m-%d").to_string();
        debug!(%url, %date, "fetching day");

        let response = self
            .http
            .get(url)
            .query(&[("date", date.as_str())])
            .send()
            .await?;
        let body: DayResponse = ensure_success(response).await?.json().await?;

        Ok(body.into())
    }

    async fn toggle_habit(&self, habit_id: &HabitId) -> Result<(), TransportFailure> {
        let url = self.endpoint(&["habits", habit_id.as_str(), "toggle"])?;
        debug!(%url, "toggling habit");

        let response = self.http.patch(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, TransportFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        Err(TransportFailure::new(format!("server responded {status}")))
    } else {
        Err(TransportFailure::new(format!("server responded {status}: {body}")))
    }
}
