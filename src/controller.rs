//! Popup controller: pure state machine driven by `Msg`, emitting `Effect`s.
//!
//! The Yew component owns a `PopupState`, feeds it messages from DOM events
//! and finished requests, and runs the returned effects.

use crate::error::BackendError;
use crate::page_context::{NO_ACTIVE_TAB_ERROR, NO_ACTIVE_TAB_TITLE, PageContext};
use crate::summary::{SummaryMarkup, format_summary};
use crate::transcript::{Sender, Transcript};

/// Title shown until the tab query returns
pub const LOADING_TITLE: &str = "Loading...";

/// Text of the provisional assistant entry
pub const THINKING_PLACEHOLDER: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Summary,
    Chat,
}

/// Exactly one of content or error is shown once loading finishes
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryPanel {
    Loading,
    Content(SummaryMarkup),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Active tab query finished; `None` when the browser gave us nothing.
    TabResolved(Option<PageContext>),
    /// `/summary` request finished.
    SummaryLoaded(Result<String, BackendError>),
    /// User clicked a view selector.
    ViewSelected(ActiveView),
    /// User clicked "Start chat" on the intro prompt.
    StartChatClicked,
    /// Chat input edited.
    InputChanged(String),
    /// Send button or Enter key.
    SendRequested,
    /// `/chat` request finished for the provisional entry `pending_id`.
    AnswerReceived {
        pending_id: String,
        result: Result<String, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSummary {
        url: String,
    },
    AskQuestion {
        pending_id: String,
        url: String,
        question: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    title: String,
    page: Option<PageContext>,
    summary: SummaryPanel,
    view: ActiveView,
    chat_open: bool,
    input: String,
    transcript: Transcript,
}

impl PopupState {
    pub fn new() -> Self {
        PopupState {
            title: LOADING_TITLE.to_string(),
            page: None,
            summary: SummaryPanel::Loading,
            view: ActiveView::Summary,
            chat_open: false,
            input: String::new(),
            transcript: Transcript::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page(&self) -> Option<&PageContext> {
        self.page.as_ref()
    }

    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn chat_status(&self) -> ChatStatus {
        if self.transcript.has_pending() {
            ChatStatus::AwaitingResponse
        } else {
            ChatStatus::Idle
        }
    }

    /// Apply a message and return the effects the caller must run.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::TabResolved(page) => self.resolve_tab(page),
            Msg::SummaryLoaded(Ok(text)) => {
                self.summary = SummaryPanel::Content(format_summary(&text));
                Vec::new()
            }
            Msg::SummaryLoaded(Err(err)) => {
                log::warn!("Summary request failed (status {:?}): {}", err.status(), err);
                self.summary = SummaryPanel::Error(format!(
                    "Error: {}. Make sure the backend is running.",
                    err
                ));
                Vec::new()
            }
            Msg::ViewSelected(view) => {
                self.view = view;
                Vec::new()
            }
            Msg::StartChatClicked => {
                self.chat_open = true;
                Vec::new()
            }
            Msg::InputChanged(value) => {
                self.input = value;
                Vec::new()
            }
            Msg::SendRequested => self.send_message(),
            Msg::AnswerReceived { pending_id, result } => {
                self.transcript.remove(&pending_id);
                match result {
                    Ok(answer) => self.transcript.push(answer, Sender::Ai),
                    Err(err) => {
                        log::warn!("Chat request failed (status {:?}): {}", err.status(), err);
                        self.transcript.push(format!("Error: {}", err), Sender::System);
                    }
                }
                Vec::new()
            }
        }
    }

    fn resolve_tab(&mut self, page: Option<PageContext>) -> Vec<Effect> {
        if self.page.is_some() {
            log::debug!("Ignoring repeated tab resolution");
            return Vec::new();
        }

        match page {
            Some(page) => {
                log::info!("Summarizing {}", page.url);
                self.title = page.title.clone();
                let effect = Effect::FetchSummary {
                    url: page.url.clone(),
                };
                self.page = Some(page);
                vec![effect]
            }
            None => {
                self.title = NO_ACTIVE_TAB_TITLE.to_string();
                self.summary = SummaryPanel::Error(NO_ACTIVE_TAB_ERROR.to_string());
                Vec::new()
            }
        }
    }

    fn send_message(&mut self) -> Vec<Effect> {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return Vec::new();
        }

        self.transcript.push(question.clone(), Sender::User);
        self.input.clear();
        let pending_id = self
            .transcript
            .push_provisional(THINKING_PLACEHOLDER.to_string());

        // Without a tab the question still goes out, just with no page URL
        let url = self
            .page
            .as_ref()
            .map(|page| page.url.clone())
            .unwrap_or_default();

        vec![Effect::AskQuestion {
            pending_id,
            url,
            question,
        }]
    }
}

impl Default for PopupState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CHAT_FAILED, SUMMARY_FAILED};
    use crate::summary::SummaryBlock;
    use crate::transcript::ChatMessage;

    fn page() -> PageContext {
        PageContext::new(
            "https://example.com/post".to_string(),
            "Example Post".to_string(),
        )
    }

    fn opened() -> PopupState {
        let mut state = PopupState::new();
        state.update(Msg::TabResolved(Some(page())));
        state
    }

    fn type_and_send(state: &mut PopupState, text: &str) -> Vec<Effect> {
        state.update(Msg::InputChanged(text.to_string()));
        state.update(Msg::SendRequested)
    }

    fn pending_id(effects: &[Effect]) -> String {
        match effects {
            [Effect::AskQuestion { pending_id, .. }] => pending_id.clone(),
            other => panic!("expected one AskQuestion, got {:?}", other),
        }
    }

    fn texts(state: &PopupState) -> Vec<(Sender, &str)> {
        state
            .transcript()
            .messages()
            .iter()
            .map(|m| (m.sender, m.text.as_str()))
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let state = PopupState::new();
        assert_eq!(state.title(), LOADING_TITLE);
        assert_eq!(state.summary(), &SummaryPanel::Loading);
        assert_eq!(state.view(), ActiveView::Summary);
        assert!(!state.chat_open());
        assert_eq!(state.chat_status(), ChatStatus::Idle);
    }

    #[test]
    fn test_tab_found_fetches_summary() {
        let mut state = PopupState::new();
        let effects = state.update(Msg::TabResolved(Some(page())));

        assert_eq!(
            effects,
            vec![Effect::FetchSummary {
                url: "https://example.com/post".to_string()
            }]
        );
        assert_eq!(state.title(), "Example Post");
        assert_eq!(state.page(), Some(&page()));
    }

    #[test]
    fn test_no_tab_shows_error_without_requests() {
        let mut state = PopupState::new();
        let effects = state.update(Msg::TabResolved(None));

        assert!(effects.is_empty());
        assert_eq!(state.title(), "No active tab found");
        assert_eq!(
            state.summary(),
            &SummaryPanel::Error("Cannot access current tab.".to_string())
        );
    }

    #[test]
    fn test_second_tab_resolution_is_ignored() {
        let mut state = opened();
        let other = PageContext::new("https://other.com".to_string(), "Other".to_string());

        assert!(state.update(Msg::TabResolved(Some(other))).is_empty());
        assert_eq!(state.title(), "Example Post");
    }

    #[test]
    fn test_summary_bullets_render_as_list() {
        let mut state = opened();
        state.update(Msg::SummaryLoaded(Ok("- a\n- b".to_string())));

        match state.summary() {
            SummaryPanel::Content(markup) => {
                assert!(markup.is_list());
                assert_eq!(
                    markup.blocks(),
                    &[
                        SummaryBlock::ListItem("a".to_string()),
                        SummaryBlock::ListItem("b".to_string()),
                    ]
                );
            }
            other => panic!("expected content, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_detail_error() {
        let mut state = opened();
        state.update(Msg::SummaryLoaded(Err(BackendError::Status {
            status: 400,
            message: "bad url".to_string(),
        })));

        assert_eq!(
            state.summary(),
            &SummaryPanel::Error("Error: bad url. Make sure the backend is running.".to_string())
        );
    }

    #[test]
    fn test_summary_default_error() {
        let mut state = opened();
        state.update(Msg::SummaryLoaded(Err(BackendError::Status {
            status: 500,
            message: SUMMARY_FAILED.to_string(),
        })));

        assert_eq!(
            state.summary(),
            &SummaryPanel::Error(
                "Error: Failed to fetch summary. Make sure the backend is running.".to_string()
            )
        );
    }

    #[test]
    fn test_summary_network_error() {
        let mut state = opened();
        state.update(Msg::SummaryLoaded(Err(BackendError::Network(
            "Failed to fetch".to_string(),
        ))));

        assert_eq!(
            state.summary(),
            &SummaryPanel::Error("Error: Failed to fetch. Make sure the backend is running.".to_string())
        );
    }

    #[test]
    fn test_view_switch_preserves_summary() {
        let mut state = opened();
        state.update(Msg::SummaryLoaded(Ok("Short summary.".to_string())));
        let before = state.summary().clone();

        assert!(state.update(Msg::ViewSelected(ActiveView::Chat)).is_empty());
        assert_eq!(state.view(), ActiveView::Chat);
        assert!(state.update(Msg::ViewSelected(ActiveView::Summary)).is_empty());
        assert_eq!(state.view(), ActiveView::Summary);

        assert_eq!(state.summary(), &before);
    }

    #[test]
    fn test_start_chat_keeps_view() {
        let mut state = opened();
        state.update(Msg::ViewSelected(ActiveView::Chat));
        state.update(Msg::StartChatClicked);

        assert!(state.chat_open());
        assert_eq!(state.view(), ActiveView::Chat);

        let mut state = opened();
        state.update(Msg::StartChatClicked);
        assert!(state.chat_open());
        assert_eq!(state.view(), ActiveView::Summary);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut state = opened();

        assert!(type_and_send(&mut state, "").is_empty());
        assert!(type_and_send(&mut state, "   \t ").is_empty());
        assert!(state.transcript().messages().is_empty());
        assert_eq!(state.chat_status(), ChatStatus::Idle);
    }

    #[test]
    fn test_send_appends_user_and_provisional() {
        let mut state = opened();
        let effects = type_and_send(&mut state, "  hi ");

        assert_eq!(state.input(), "");
        assert_eq!(texts(&state), vec![(Sender::User, "hi"), (Sender::Ai, THINKING_PLACEHOLDER)]);
        let provisional: &ChatMessage = &state.transcript().messages()[1];
        assert!(provisional.pending);
        assert_eq!(provisional.id.as_deref(), Some(pending_id(&effects).as_str()));
        assert_eq!(state.chat_status(), ChatStatus::AwaitingResponse);

        match &effects[0] {
            Effect::AskQuestion { url, question, .. } => {
                assert_eq!(url, "https://example.com/post");
                assert_eq!(question, "hi");
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_answer_replaces_provisional() {
        let mut state = opened();
        let id = pending_id(&type_and_send(&mut state, "hi"));

        state.update(Msg::AnswerReceived {
            pending_id: id,
            result: Ok("hello there".to_string()),
        });

        assert_eq!(texts(&state), vec![(Sender::User, "hi"), (Sender::Ai, "hello there")]);
        assert!(state.transcript().messages()[1].id.is_none());
        assert_eq!(state.chat_status(), ChatStatus::Idle);
    }

    #[test]
    fn test_failed_answer_becomes_system_entry() {
        let mut state = opened();
        let id = pending_id(&type_and_send(&mut state, "hi"));

        state.update(Msg::AnswerReceived {
            pending_id: id,
            result: Err(BackendError::Status {
                status: 500,
                message: CHAT_FAILED.to_string(),
            }),
        });

        assert_eq!(
            texts(&state),
            vec![(Sender::User, "hi"), (Sender::System, "Error: Failed to get response")]
        );
        assert_eq!(state.chat_status(), ChatStatus::Idle);
    }

    #[test]
    fn test_overlapping_sends() {
        let mut state = opened();
        let first = pending_id(&type_and_send(&mut state, "one"));
        let second = pending_id(&type_and_send(&mut state, "two"));
        assert_ne!(first, second);

        state.update(Msg::AnswerReceived {
            pending_id: second,
            result: Ok("answer two".to_string()),
        });
        assert_eq!(state.chat_status(), ChatStatus::AwaitingResponse);

        state.update(Msg::AnswerReceived {
            pending_id: first,
            result: Ok("answer one".to_string()),
        });

        assert_eq!(
            texts(&state),
            vec![
                (Sender::User, "one"),
                (Sender::User, "two"),
                (Sender::Ai, "answer two"),
                (Sender::Ai, "answer one"),
            ]
        );
        assert_eq!(state.chat_status(), ChatStatus::Idle);
    }

    #[test]
    fn test_chat_without_tab_sends_empty_url() {
        let mut state = PopupState::new();
        state.update(Msg::TabResolved(None));
        let effects = type_and_send(&mut state, "anyone there?");

        match &effects[..] {
            [Effect::AskQuestion { url, .. }] => assert_eq!(url, ""),
            other => panic!("unexpected effects {:?}", other),
        }
    }
}
