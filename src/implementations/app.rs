use std::sync::Arc;
use std::time::Duration;

use log::{ info, warn };
use tokio::task::AbortHandle;

use crate::config::FlipperConfig;
use crate::errors::{ FlipperError, FlipperResult };
use crate::implementations::analysis_pipeline::FlipAnalyzer;
use crate::implementations::app_state::{ AppEvent, AppState, Ticket };
use crate::implementations::gemini_client::GeminiClient;
use crate::implementations::mock_generator::MockGenerator;
use crate::implementations::property_store::PropertyStore;
use crate::models::analysis::Analysis;
use crate::models::common::{ Backend, ModelVariant };
use crate::models::property::{ Property, PropertyId, PropertyInput };
use crate::traits::key_value_store::KeyValueStore;
use crate::traits::text_generator::TextGenerator;

pub type DynAnalyzer = FlipAnalyzer<Box<dyn TextGenerator>>;

/// Pick the text generator named by the configuration
pub fn build_generator(config: &FlipperConfig) -> FlipperResult<Box<dyn TextGenerator>> {
    match config.backend {
        Backend::Live => Ok(Box::new(GeminiClient::new(config.gemini.clone())?)),
        Backend::Mock => {
            Ok(Box::new(MockGenerator::with_delay(Duration::from_millis(config.mock_delay_ms))))
        }
    }
}

/// An analysis running in the background, identified by its ticket
pub struct AnalysisJob {
    pub ticket: Ticket,
    handle: tokio::task::JoinHandle<FlipperResult<Analysis>>,
}

/// Property store, analysis pipeline and view state wired together
pub struct App<S: KeyValueStore> {
    store: PropertyStore<S>,
    analyzer: Arc<DynAnalyzer>,
    state: AppState,
    in_flight: Option<AbortHandle>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: PropertyStore<S>, analyzer: DynAnalyzer, model: ModelVariant) -> Self {
        Self {
            store,
            analyzer: Arc::new(analyzer),
            state: AppState::with_model(model),
            in_flight: None,
        }
    }

    pub fn from_config(config: &FlipperConfig, storage: S) -> FlipperResult<Self> {
        let analyzer = FlipAnalyzer::new(build_generator(config)?, &config.gemini)?;
        Ok(Self::new(PropertyStore::open(storage), analyzer, config.default_model.clone()))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn properties(&self) -> &[Property] {
        self.store.list()
    }

    pub fn store(&self) -> &PropertyStore<S> {
        &self.store
    }

    pub fn backend_name(&self) -> &str {
        self.analyzer.generator().name()
    }

    pub fn add_property(&mut self, input: &PropertyInput) -> FlipperResult<Property> {
        self.store.add(input)
    }

    /// Remove a property, discarding its analysis or pending request
    pub fn remove_property(&mut self, id: &PropertyId) -> Option<Property> {
        let removed = self.store.remove(id)?;
        let was_pending = self.state.pending.map_or(false, |p| p.property_id == *id);
        if was_pending {
            if let Some(handle) = self.in_flight.take() {
                handle.abort();
            }
        }
        self.dispatch(AppEvent::PropertyRemoved(*id));
        Some(removed)
    }

    pub fn select_model(&mut self, model: ModelVariant) {
        self.dispatch(AppEvent::ModelSelected(model));
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(AppEvent::ErrorDismissed);
    }

    /// Start analysing a property in the background.
    ///
    /// Any request still in flight is aborted and its ticket superseded, so
    /// only the newest request can land in the view state.
    pub fn begin_analysis(&mut self, id: &PropertyId) -> FlipperResult<AnalysisJob> {
        let property = self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FlipperError::Validation(format!("No property with id {}", id)))?;

        if let Some(handle) = self.in_flight.take() {
            info!("Cancelling superseded analysis request");
            handle.abort();
        }

        let ticket = self.state.issue_ticket();
        self.dispatch(AppEvent::AnalysisRequested { ticket, property_id: property.id });

        let analyzer = Arc::clone(&self.analyzer);
        let model = self.state.model.clone();
        let handle = tokio::spawn(async move { analyzer.analyze(&property, &model).await });
        self.in_flight = Some(handle.abort_handle());

        Ok(AnalysisJob { ticket, handle })
    }

    /// Wait for a job and fold its outcome into the view state
    pub async fn finish_analysis(&mut self, job: AnalysisJob) -> FlipperResult<&Analysis> {
        let ticket = job.ticket;
        let outcome = match job.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(FlipperError::Service("Analysis was cancelled".to_string())),
            Err(e) => Err(FlipperError::Service(format!("Analysis task failed: {}", e))),
        };
        let current = self.state.pending.map_or(false, |p| p.ticket == ticket);
        if current {
            self.in_flight = None;
        }

        match outcome {
            Ok(analysis) => {
                if !current {
                    return Err(FlipperError::Service("Analysis was superseded".to_string()));
                }
                self.dispatch(AppEvent::AnalysisSucceeded { ticket, analysis });
                self.state.analysis
                    .as_ref()
                    .ok_or_else(|| FlipperError::Service("Analysis was discarded".to_string()))
            }
            Err(err) => {
                warn!("Analysis request {} failed: {}", ticket, err);
                self.dispatch(AppEvent::AnalysisFailed { ticket, message: err.to_string() });
                Err(err)
            }
        }
    }

    /// Analyse one property end to end
    pub async fn analyze(&mut self, id: &PropertyId) -> FlipperResult<&Analysis> {
        let job = self.begin_analysis(id)?;
        self.finish_analysis(job).await
    }

    fn dispatch(&mut self, event: AppEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.update(event);
    }
}
