use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::{
    AxisName, ChartConfiguration, ChartId, ChartVariable, MapConfig, SelectedEntity,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{AvailableTabs, EditorTab, TabStateMachine};

use super::{
    ChartRequest, ChartTransport, ConfirmPrompt, DialogPresenter, EditorData, EditorSettings,
    EditorVariable, HttpMethod, Navigator, PendingRequest, RequestCoordinator, RequestGeneration,
    RequestKind, Revision, RevisionCounter, Settlement, TransportResponse, WindowHandle,
};

pub const SAVE_ERROR_TITLE: &str = "Error saving chart";

/// Undo step for an optimistic edit, run when the save it accompanied fails.
pub type Rollback = Box<dyn FnOnce(&mut ChartConfiguration)>;

#[derive(Default)]
pub struct SaveOptions {
    on_error: Option<Rollback>,
}

impl SaveOptions {
    #[must_use]
    pub fn with_rollback(rollback: impl FnOnce(&mut ChartConfiguration) + 'static) -> Self {
        Self {
            on_error: Some(Box::new(rollback)),
        }
    }
}

impl std::fmt::Debug for SaveOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveOptions")
            .field("has_rollback", &self.on_error.is_some())
            .finish()
    }
}

/// Handle for a request started with [`ConfigStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: RequestGeneration,
}

impl RequestTicket {
    #[must_use]
    pub fn generation(self) -> RequestGeneration {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveTarget {
    Create,
    Update(ChartId),
    /// Save-as-new into a browsing context opened before the request.
    Copy(WindowHandle),
}

/// In-flight save. Must be handed back to [`ConfigStore::finish_save`] exactly once.
pub struct SaveTicket {
    generation: RequestGeneration,
    target: SaveTarget,
    request: ChartRequest,
    config_revision: Revision,
    rollback: Option<Rollback>,
}

impl SaveTicket {
    #[must_use]
    pub fn request(&self) -> &ChartRequest {
        &self.request
    }

    #[must_use]
    pub fn target(&self) -> SaveTarget {
        self.target
    }

    #[must_use]
    pub fn generation(&self) -> RequestGeneration {
        self.generation
    }
}

impl std::fmt::Debug for SaveTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveTicket")
            .field("generation", &self.generation)
            .field("target", &self.target)
            .field("request", &self.request)
            .field("config_revision", &self.config_revision)
            .field("has_rollback", &self.rollback.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveOutcome {
    /// Update accepted and nothing changed meanwhile; the state is clean.
    Saved { id: ChartId },
    /// Update accepted, but newer edits or requests exist; the state stays dirty.
    SavedWithNewerChanges { id: ChartId },
    /// New chart created; the page was sent to its admin location.
    Created { id: ChartId, location: String },
    /// Copy created; the pre-opened context was sent to its edit location.
    Copied { id: ChartId, location: String },
    /// Error was shown to the operator.
    Failed { message: String, rolled_back: bool },
}

/// Snapshot of the editor-level flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub current_tab: EditorTab,
    pub dirty: bool,
    pub pending_request: Option<PendingRequest>,
}

#[derive(Debug, Deserialize)]
struct SavedChartEnvelope {
    data: SavedChartData,
}

#[derive(Debug, Deserialize)]
struct SavedChartData {
    id: ChartId,
}

/// Owns one chart configuration for the length of an editing session.
///
/// Every mutation goes through the store so the revision counter and dirty flag
/// stay in step with the configuration.
pub struct ConfigStore<N: Navigator, D: DialogPresenter> {
    config: ChartConfiguration,
    data: EditorData,
    settings: EditorSettings,
    tabs: TabStateMachine,
    dirty: bool,
    revision: RevisionCounter,
    coordinator: RequestCoordinator,
    navigator: N,
    dialogs: D,
}

impl<N: Navigator, D: DialogPresenter> ConfigStore<N, D> {
    pub fn new(
        mut config: ChartConfiguration,
        data: EditorData,
        settings: EditorSettings,
        navigator: N,
        dialogs: D,
    ) -> Self {
        config.normalize();
        let tabs = TabStateMachine::for_config(&config);
        debug!(chart_id = ?config.id, "editor session opened");
        Self {
            config,
            data,
            settings,
            tabs,
            dirty: false,
            revision: RevisionCounter::default(),
            coordinator: RequestCoordinator::default(),
            navigator,
            dialogs,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfiguration {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    #[must_use]
    pub fn data(&self) -> &EditorData {
        &self.data
    }

    pub fn set_data(&mut self, data: EditorData) {
        self.data = data;
    }

    #[must_use]
    pub fn variables_by_id(&self) -> indexmap::IndexMap<i64, &EditorVariable> {
        self.data.variables_by_id()
    }

    #[must_use]
    pub fn revision(&self) -> Revision {
        self.revision.current()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn is_saved(&self) -> bool {
        !self.dirty
    }

    #[must_use]
    pub fn is_new_chart(&self) -> bool {
        self.config.is_new()
    }

    #[must_use]
    pub fn pending_request(&self) -> Option<PendingRequest> {
        self.coordinator.pending()
    }

    #[must_use]
    pub fn state(&self) -> EditorState {
        EditorState {
            current_tab: self.current_tab(),
            dirty: self.dirty,
            pending_request: self.coordinator.pending(),
        }
    }

    #[must_use]
    pub fn canonical_url(&self) -> String {
        self.config.canonical_url(&self.settings.public_base_url)
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    #[must_use]
    pub fn into_parts(self) -> (ChartConfiguration, N, D) {
        (self.config, self.navigator, self.dialogs)
    }

    // Tabs

    #[must_use]
    pub fn tabs(&self) -> &TabStateMachine {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabStateMachine {
        &mut self.tabs
    }

    #[must_use]
    pub fn available_tabs(&self) -> AvailableTabs {
        self.tabs.available_tabs(&self.config)
    }

    #[must_use]
    pub fn current_tab(&self) -> EditorTab {
        self.tabs.current_tab(&self.config)
    }

    pub fn select_tab(&mut self, tab: EditorTab) -> ChartResult<()> {
        self.tabs.select_tab(tab, &self.config)
    }

    // Mutations

    /// Applies `edit` to the configuration and marks the session dirty.
    pub fn update<T>(&mut self, edit: impl FnOnce(&mut ChartConfiguration) -> T) -> T {
        let output = edit(&mut self.config);
        self.mark_changed();
        output
    }

    /// Like [`Self::update`], but only marks dirty when `edit` reports a change.
    pub fn update_if(&mut self, edit: impl FnOnce(&mut ChartConfiguration) -> bool) -> bool {
        let changed = edit(&mut self.config);
        if changed {
            self.mark_changed();
        }
        changed
    }

    pub fn set_axis_config(&mut self, axis: AxisName, prop: impl Into<String>, value: Value) {
        self.update(|config| config.set_axis_config(axis, prop, value));
    }

    pub fn add_selected_entity(&mut self, entity: SelectedEntity) -> bool {
        self.update_if(|config| config.add_selected_entity(entity))
    }

    pub fn update_selected_entity_color(&mut self, id: &str, color: impl Into<String>) -> bool {
        self.update_if(|config| config.update_selected_entity_color(id, color))
    }

    pub fn remove_selected_entity(&mut self, id: &str) -> bool {
        self.update_if(|config| config.remove_selected_entity(id))
    }

    pub fn replace_selected_entities(&mut self, entity: SelectedEntity) {
        self.update(|config| config.replace_selected_entities(entity));
    }

    pub fn add_variable(&mut self, variable: ChartVariable) -> bool {
        self.update_if(|config| config.add_variable(variable))
    }

    pub fn update_map_config<T>(&mut self, edit: impl FnOnce(&mut MapConfig) -> T) -> T {
        self.update(|config| edit(&mut config.map_config))
    }

    fn mark_changed(&mut self) {
        let revision = self.revision.bump();
        if !self.dirty {
            debug!(revision = revision.raw(), "chart has unsaved changes");
        }
        self.dirty = true;
    }

    // Requests

    /// Reports a request as the pending one, replacing any earlier report.
    pub fn load(&mut self, kind: RequestKind) -> RequestTicket {
        RequestTicket {
            generation: self.coordinator.start(kind),
        }
    }

    pub fn settle_load(&mut self, ticket: RequestTicket) -> Settlement {
        self.coordinator.settle(ticket.generation)
    }

    /// Starts a create (no identity yet) or update request for the current configuration.
    pub fn begin_save(&mut self, options: SaveOptions) -> ChartResult<SaveTicket> {
        let body = self.config.to_json_string()?;
        let id = self.config.id;
        let (method, target) = match id {
            Some(id) => (HttpMethod::Put, SaveTarget::Update(id)),
            None => (HttpMethod::Post, SaveTarget::Create),
        };
        let ticket = self.load(RequestKind::Save);
        debug!(
            generation = ticket.generation.raw(),
            ?target,
            "save chart started"
        );
        Ok(SaveTicket {
            generation: ticket.generation,
            target,
            request: ChartRequest {
                method,
                path: EditorSettings::save_path(id),
                body,
            },
            config_revision: self.revision.current(),
            rollback: options.on_error,
        })
    }

    /// Starts creating a copy of the chart without identity or publish state.
    ///
    /// The target browsing context is opened immediately, before the request.
    pub fn begin_save_as_new(&mut self) -> ChartResult<SaveTicket> {
        let body = self.config.detached_copy().to_json_string()?;
        let window = self.navigator.open_blank();
        let ticket = self.load(RequestKind::SaveAsNew);
        debug!(
            generation = ticket.generation.raw(),
            window = window.raw(),
            "save as new chart started"
        );
        Ok(SaveTicket {
            generation: ticket.generation,
            target: SaveTarget::Copy(window),
            request: ChartRequest {
                method: HttpMethod::Post,
                path: EditorSettings::save_path(None),
                body,
            },
            config_revision: self.revision.current(),
            rollback: None,
        })
    }

    /// Asks for confirmation, then optimistically publishes and starts a save.
    ///
    /// Returns `None` when the operator declines.
    pub fn begin_publish(&mut self) -> ChartResult<Option<SaveTicket>> {
        let prompt = ConfirmPrompt::Publish {
            url: self.canonical_url(),
        };
        if !self.dialogs.confirm(&prompt) {
            debug!("publish declined");
            return Ok(None);
        }
        self.update(|config| config.is_published = true);
        self.begin_save(SaveOptions::with_rollback(|config| {
            config.is_published = false;
        }))
        .map(Some)
    }

    pub fn begin_unpublish(&mut self) -> ChartResult<Option<SaveTicket>> {
        if !self.dialogs.confirm(&ConfirmPrompt::Unpublish) {
            debug!("unpublish declined");
            return Ok(None);
        }
        self.update(|config| config.is_published = false);
        self.begin_save(SaveOptions::with_rollback(|config| {
            config.is_published = true;
        }))
        .map(Some)
    }

    /// Completes a save with whatever the transport produced.
    ///
    /// Failures are shown to the operator and never escape. Dirty and publish
    /// state are only touched when the ticket is still the pending request; an
    /// update additionally clears the dirty flag only if the configuration did
    /// not change while the request was in flight.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        response: ChartResult<TransportResponse>,
    ) -> SaveOutcome {
        let SaveTicket {
            generation,
            target,
            config_revision,
            rollback,
            ..
        } = ticket;
        let settlement = self.coordinator.settle(generation);

        let response = match response.and_then(check_status) {
            Ok(response) => response,
            Err(err) => return self.fail_save(target, settlement, rollback, err),
        };

        match target {
            SaveTarget::Update(id) => {
                let unchanged = config_revision == self.revision.current();
                if settlement == Settlement::Current && unchanged {
                    self.dirty = false;
                    info!(chart_id = id.raw(), "chart saved");
                    SaveOutcome::Saved { id }
                } else {
                    debug!(
                        chart_id = id.raw(),
                        ?settlement,
                        unchanged,
                        "chart saved; newer changes keep it dirty"
                    );
                    SaveOutcome::SavedWithNewerChanges { id }
                }
            }
            SaveTarget::Create => match parse_saved_id(&response) {
                Ok(id) => {
                    let location = self.settings.chart_location(id);
                    info!(chart_id = id.raw(), %location, "chart created");
                    self.navigator.assign(&location);
                    SaveOutcome::Created { id, location }
                }
                Err(err) => self.fail_save(target, settlement, rollback, err),
            },
            SaveTarget::Copy(window) => match parse_saved_id(&response) {
                Ok(id) => {
                    let location = self.settings.edit_location(id);
                    info!(chart_id = id.raw(), %location, "chart copied");
                    self.navigator.assign_window(window, &location);
                    SaveOutcome::Copied { id, location }
                }
                Err(err) => self.fail_save(target, settlement, rollback, err),
            },
        }
    }

    pub fn save_chart<T>(
        &mut self,
        transport: &mut T,
        options: SaveOptions,
    ) -> ChartResult<SaveOutcome>
    where
        T: ChartTransport + ?Sized,
    {
        let ticket = self.begin_save(options)?;
        let response = transport.send(ticket.request());
        Ok(self.finish_save(ticket, response))
    }

    pub fn save_as_new_chart<T>(&mut self, transport: &mut T) -> ChartResult<SaveOutcome>
    where
        T: ChartTransport + ?Sized,
    {
        let ticket = self.begin_save_as_new()?;
        let response = transport.send(ticket.request());
        Ok(self.finish_save(ticket, response))
    }

    pub fn publish_chart<T>(&mut self, transport: &mut T) -> ChartResult<Option<SaveOutcome>>
    where
        T: ChartTransport + ?Sized,
    {
        let Some(ticket) = self.begin_publish()? else {
            return Ok(None);
        };
        let response = transport.send(ticket.request());
        Ok(Some(self.finish_save(ticket, response)))
    }

    pub fn unpublish_chart<T>(&mut self, transport: &mut T) -> ChartResult<Option<SaveOutcome>>
    where
        T: ChartTransport + ?Sized,
    {
        let Some(ticket) = self.begin_unpublish()? else {
            return Ok(None);
        };
        let response = transport.send(ticket.request());
        Ok(Some(self.finish_save(ticket, response)))
    }

    fn fail_save(
        &mut self,
        target: SaveTarget,
        settlement: Settlement,
        rollback: Option<Rollback>,
        err: ChartError,
    ) -> SaveOutcome {
        let message = err.user_message();
        warn!(error = %err, ?target, "chart save failed");
        if let SaveTarget::Copy(window) = target {
            self.navigator.close_window(window);
        }
        self.dialogs.show_error(SAVE_ERROR_TITLE, &message);

        let rolled_back = match rollback {
            Some(rollback) if settlement == Settlement::Current => {
                self.update(rollback);
                true
            }
            Some(_) => {
                debug!("skipping rollback of superseded save");
                false
            }
            None => false,
        };
        SaveOutcome::Failed {
            message,
            rolled_back,
        }
    }
}

fn check_status(response: TransportResponse) -> ChartResult<TransportResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ChartError::RequestFailed {
            status: response.status,
            message: response.body,
        })
    }
}

fn parse_saved_id(response: &TransportResponse) -> ChartResult<ChartId> {
    serde_json::from_str::<SavedChartEnvelope>(&response.body)
        .map(|envelope| envelope.data.id)
        .map_err(|e| ChartError::InvalidResponse(format!("failed to parse saved chart id: {e}")))
}
