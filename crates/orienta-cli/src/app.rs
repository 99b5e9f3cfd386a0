//! Composition root: wires configuration, storage and the REST client
//! into the application services.

use anyhow::Result;
use orienta_application::{AuthContext, GuideGeneration, GuideLibrary, MessageCenter};
use orienta_core::config::ClientConfig;
use orienta_core::guide::GuideRepository;
use orienta_infrastructure::{ConfigService, FileSessionStore, OrientaPaths};
use orienta_interaction::{ApiClient, HttpAuthService, HttpGuideRepository, HttpStatusService};
use std::sync::Arc;

pub struct App {
    pub config: ClientConfig,
    pub config_service: ConfigService,
    pub messages: MessageCenter,
    pub auth: Arc<AuthContext>,
    pub guides: Arc<dyn GuideRepository>,
    pub library: GuideLibrary,
    pub generation: GuideGeneration,
    pub status: HttpStatusService,
}

impl App {
    pub fn build(config_service: ConfigService, paths: &OrientaPaths) -> Result<Self> {
        let config = config_service.get_config()?;
        let api = ApiClient::new(&config)?;
        let messages = MessageCenter::new();

        let auth = Arc::new(AuthContext::new(
            Arc::new(HttpAuthService::new(api.clone())),
            Arc::new(FileSessionStore::new(paths)),
            messages.clone(),
        ));

        let repository = Arc::new(HttpGuideRepository::new(api.clone()));
        let library = GuideLibrary::new(repository.clone(), messages.clone());
        let generation = GuideGeneration::new(repository.clone(), auth.clone(), messages.clone());

        tracing::debug!("[App] Services ready for {}", api.base_url());
        Ok(Self {
            config,
            config_service,
            messages,
            auth,
            guides: repository,
            library,
            generation,
            status: HttpStatusService::new(api),
        })
    }
}
