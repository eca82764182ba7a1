#![allow(dead_code)]

use std::collections::VecDeque;

use chart_editor::api::{
    ChartRequest, ChartTransport, ConfigStore, ConfirmPrompt, DialogPresenter, EditorData,
    EditorSettings, Navigator, TransportResponse, WindowHandle,
};
use chart_editor::core::{ChartConfiguration, ChartId};
use chart_editor::error::{ChartError, ChartResult};

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub assigned: Vec<String>,
    pub opened: Vec<WindowHandle>,
    pub window_locations: Vec<(WindowHandle, String)>,
    pub closed: Vec<WindowHandle>,
}

impl Navigator for RecordingNavigator {
    fn assign(&mut self, location: &str) {
        self.assigned.push(location.to_owned());
    }

    fn open_blank(&mut self) -> WindowHandle {
        let handle = WindowHandle::new(self.opened.len() as u64 + 1);
        self.opened.push(handle);
        handle
    }

    fn assign_window(&mut self, window: WindowHandle, location: &str) {
        self.window_locations.push((window, location.to_owned()));
    }

    fn close_window(&mut self, window: WindowHandle) {
        self.closed.push(window);
    }
}

#[derive(Debug)]
pub struct ScriptedDialogs {
    pub confirm_answer: bool,
    pub prompts: Vec<ConfirmPrompt>,
    pub errors: Vec<(String, String)>,
}

impl ScriptedDialogs {
    pub fn accepting() -> Self {
        Self {
            confirm_answer: true,
            prompts: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn declining() -> Self {
        Self {
            confirm_answer: false,
            ..Self::accepting()
        }
    }
}

impl DialogPresenter for ScriptedDialogs {
    fn show_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_owned(), message.to_owned()));
    }

    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.push(prompt.clone());
        self.confirm_answer
    }
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<ChartResult<TransportResponse>>,
    pub requests: Vec<ChartRequest>,
}

impl ScriptedTransport {
    pub fn replying(responses: Vec<ChartResult<TransportResponse>>) -> Self {
        Self {
            responses: responses.into(),
            requests: Vec::new(),
        }
    }

    pub fn created(id: u64) -> ChartResult<TransportResponse> {
        Ok(TransportResponse::new(
            200,
            format!(r#"{{"success":true,"data":{{"id":{id}}}}}"#),
        ))
    }

    pub fn ok() -> ChartResult<TransportResponse> {
        Ok(TransportResponse::new(200, r#"{"success":true}"#))
    }

    pub fn status(status: u16, body: &str) -> ChartResult<TransportResponse> {
        Ok(TransportResponse::new(status, body))
    }

    pub fn broken(message: &str) -> ChartResult<TransportResponse> {
        Err(ChartError::Transport(message.to_owned()))
    }
}

impl ChartTransport for ScriptedTransport {
    fn send(&mut self, request: &ChartRequest) -> ChartResult<TransportResponse> {
        self.requests.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(ChartError::Transport("no scripted response".to_owned())))
    }
}

pub type TestStore = ConfigStore<RecordingNavigator, ScriptedDialogs>;

pub fn existing_chart(id: u64) -> ChartConfiguration {
    ChartConfiguration {
        id: Some(ChartId::new(id)),
        name: "Life expectancy".to_owned(),
        slug: "life-expectancy".to_owned(),
        ..ChartConfiguration::default()
    }
}

pub fn store_with(config: ChartConfiguration, dialogs: ScriptedDialogs) -> TestStore {
    ConfigStore::new(
        config,
        EditorData::default(),
        EditorSettings::default()
            .with_admin_root_url("https://admin.test")
            .with_public_base_url("https://charts.test"),
        RecordingNavigator::default(),
        dialogs,
    )
}
