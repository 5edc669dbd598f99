use std::sync::Arc;

use anyhow::Result;
use desk_core::config::PAGINATE_DEFAULT;
use desk_core::{ApiTransport, DeskConfig, DeskConfigSnapshot, Notifier, Resource, TracingNotifier};
use desk_http::{ClientConfig, HttpClient};
use once_cell::sync::OnceCell;
use tracing::info;

use crate::pages::{Confirm, DetailPage, FormPage, ListPage, Navigator};
use crate::resources::{Editable, Organization, ResourceApi, Team, User};

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Application wiring: configuration, the shared transport and the
/// notification side channel.
///
/// The HTTP client is built on first use and then shared by every hook
/// this app hands out.
pub struct AdminApp {
    config: DeskConfigSnapshot,
    transport: OnceCell<Arc<dyn ApiTransport>>,
    notifier: Arc<dyn Notifier>,
}

impl AdminApp {
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            config: config.snapshot(),
            transport: OnceCell::new(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Defaults overridden by `DESK__*` environment variables.
    pub fn from_env() -> Self {
        let mut config = DeskConfig::new();
        config.set(PAGINATE_DEFAULT, DEFAULT_PAGE_SIZE.to_string());
        config.load_env("DESK__");
        Self::new(&config)
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Use `transport` instead of building an HTTP client. Replaces any
    /// client already built; hooks handed out earlier keep the old one.
    pub fn with_transport(mut self, transport: Arc<dyn ApiTransport>) -> Self {
        self.transport = OnceCell::with_value(transport);
        self
    }

    pub fn config(&self) -> &DeskConfigSnapshot {
        &self.config
    }

    pub fn page_size(&self) -> u32 {
        self.config
            .get_usize(PAGINATE_DEFAULT)
            .and_then(|size| u32::try_from(size).ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn transport(&self) -> Result<Arc<dyn ApiTransport>> {
        self.transport
            .get_or_try_init(|| {
                let client = HttpClient::new(ClientConfig::from_snapshot(&self.config)?)?;
                info!(base_url = %client.base_url(), "api client ready");
                Ok::<_, anyhow::Error>(Arc::new(client) as Arc<dyn ApiTransport>)
            })
            .cloned()
    }

    /// A fresh hook for `R` with its own state.
    pub fn resource<R: Resource>(&self) -> Result<ResourceApi<R>> {
        Ok(ResourceApi::new(self.transport()?, self.notifier.clone()))
    }

    pub fn organizations(&self) -> Result<ResourceApi<Organization>> {
        self.resource()
    }

    pub fn users(&self) -> Result<ResourceApi<User>> {
        self.resource()
    }

    pub fn teams(&self) -> Result<ResourceApi<Team>> {
        self.resource()
    }

    pub fn list_page<R: Resource>(&self, confirm: Arc<dyn Confirm>) -> Result<ListPage<R>> {
        Ok(ListPage::new(self.resource()?, confirm, self.page_size()))
    }

    pub fn detail_page<R: Resource>(&self, raw_id: &str) -> Result<DetailPage<R>> {
        Ok(DetailPage::new(self.resource()?, raw_id))
    }

    pub fn new_page<R: Editable>(&self, navigator: Arc<dyn Navigator>) -> Result<FormPage<R>> {
        Ok(FormPage::new_page(self.resource()?, navigator))
    }

    pub fn edit_page<R: Editable>(
        &self,
        navigator: Arc<dyn Navigator>,
        raw_id: &str,
    ) -> Result<FormPage<R>> {
        Ok(FormPage::edit_page(self.resource()?, navigator, raw_id))
    }
}
