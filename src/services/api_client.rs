use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::{debug, instrument};

use crate::config::app_config::ApiConfig;
use crate::domain::driver::Driver;
use crate::domain::resource_kind::ResourceKind;
use crate::domain::sale::Sale;
use crate::services::error_handling::{DeskError, DeskResult};

/// JSON client for the back-office REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> DeskResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("fleetdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeskError::Configuration {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/<resource>/<segments...>`, each segment percent-encoded.
    pub fn endpoint(&self, kind: ResourceKind, segments: &[&str]) -> DeskResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, kind.path())).map_err(|e| {
            DeskError::Configuration {
                message: format!("Invalid API base URL '{}': {}", self.base_url, e),
            }
        })?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| DeskError::Configuration {
                    message: format!("API base URL '{}' cannot take a path", self.base_url),
                })?
                .extend(segments);
        }
        Ok(url)
    }

    #[instrument(skip(self), fields(resource = %kind))]
    pub async fn list<T: DeserializeOwned>(&self, kind: ResourceKind) -> DeskResult<Vec<T>> {
        let url = self.endpoint(kind, &[])?;
        let response = self.http.get(url).send().await?;
        let response = check(response, kind, None).await?;
        let records: Vec<T> = response.json().await?;
        debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(resource = %kind))]
    pub async fn create<T>(&self, kind: ResourceKind, record: &T) -> DeskResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let url = self.endpoint(kind, &[])?;
        let response = self.http.post(url).json(record).send().await?;
        let response = check(response, kind, None).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, record), fields(resource = %kind))]
    pub async fn update<T>(&self, kind: ResourceKind, id: u64, record: &T) -> DeskResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let id_segment = id.to_string();
        let url = self.endpoint(kind, &[id_segment.as_str()])?;
        let response = self.http.put(url).json(record).send().await?;
        let response = check(response, kind, Some(id_segment)).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(resource = %kind))]
    pub async fn delete(&self, kind: ResourceKind, id: u64) -> DeskResult<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(kind, &[id_segment.as_str()])?;
        let response = self.http.delete(url).send().await?;
        check(response, kind, Some(id_segment)).await?;
        debug!(id, "Deleted record");
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        segments: &[&str],
        missing_id: Option<String>,
    ) -> DeskResult<T> {
        let url = self.endpoint(kind, segments)?;
        let response = self.http.get(url).send().await?;
        let response = check(response, kind, missing_id).await?;
        Ok(response.json().await?)
    }

    /// Create a sale with an optional supporting document.
    ///
    /// The sale goes in a JSON `data` part, the file in a `document` part.
    #[instrument(skip(self, sale, document), fields(vehicle_id = %sale.vehicle_id))]
    pub async fn create_sale_with_document(
        &self,
        sale: &Sale,
        document: Option<(String, Vec<u8>)>,
    ) -> DeskResult<Sale> {
        let data = serde_json::to_string(sale)?;
        let mut form = Form::new().part("data", Part::text(data).mime_str("application/json")?);
        if let Some((file_name, bytes)) = document {
            form = form.part("document", Part::bytes(bytes).file_name(file_name));
        }

        let url = self.endpoint(ResourceKind::Sales, &[])?;
        let response = self.http.post(url).multipart(form).send().await?;
        let response = check(response, ResourceKind::Sales, None).await?;
        Ok(response.json().await?)
    }
}

/// Map a non-success response onto the error taxonomy.
async fn check(
    response: Response,
    kind: ResourceKind,
    id: Option<String>,
) -> DeskResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let operation = response.url().path().to_string();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(DeskError::not_found(kind.noun(), id));
        }
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), body.trim())
    };
    Err(DeskError::rejected(operation, status.as_u16(), message))
}

/// Where a report screen loads its records from and deletes them through.
#[async_trait]
pub trait RecordSource<R: Send + 'static>: Send + Sync {
    async fn fetch_all(&self) -> DeskResult<Vec<R>>;

    async fn delete_by_id(&self, id: u64) -> DeskResult<()>;
}

#[cfg(test)]
mockall::mock! {
    pub RecordSource<R: Send + Sync + 'static> {}

    #[async_trait]
    impl<R: Send + Sync + 'static> RecordSource<R> for RecordSource<R> {
        async fn fetch_all(&self) -> DeskResult<Vec<R>>;

        async fn delete_by_id(&self, id: u64) -> DeskResult<()>;
    }
}

/// Typed view of one REST collection.
#[derive(Debug, Clone)]
pub struct ResourceClient<T> {
    api: ApiClient,
    kind: ResourceKind,
    _record: PhantomData<fn() -> T>,
}

impl<T> ResourceClient<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    pub fn new(api: ApiClient, kind: ResourceKind) -> Self {
        Self {
            api,
            kind,
            _record: PhantomData,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn create(&self, record: &T) -> DeskResult<T> {
        self.api.create(self.kind, record).await
    }

    pub async fn update(&self, id: u64, record: &T) -> DeskResult<T> {
        self.api.update(self.kind, id, record).await
    }
}

#[async_trait]
impl<T> RecordSource<T> for ResourceClient<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    async fn fetch_all(&self) -> DeskResult<Vec<T>> {
        self.api.list(self.kind).await
    }

    async fn delete_by_id(&self, id: u64) -> DeskResult<()> {
        self.api.delete(self.kind, id).await
    }
}

/// Driver endpoints beyond plain CRUD.
#[derive(Debug, Clone)]
pub struct DriverClient {
    api: ApiClient,
}

impl DriverClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn by_serial(&self, serial_no: u64) -> DeskResult<Driver> {
        let serial = serial_no.to_string();
        self.api
            .get_json(ResourceKind::Drivers, &["serial", serial.as_str()], Some(serial.clone()))
            .await
    }

    pub async fn by_material(&self, material: &str) -> DeskResult<Vec<Driver>> {
        self.api
            .get_json(ResourceKind::Drivers, &["material", material], None)
            .await
    }

    pub async fn by_vehicle(&self, vehicle_no: &str) -> DeskResult<Vec<Driver>> {
        self.api
            .get_json(ResourceKind::Drivers, &["vehicle", vehicle_no], None)
            .await
    }
}
