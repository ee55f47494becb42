/// Popup UI for the Page Mind extension

use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use yew::functional::UseForceUpdateHandle;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, KeyboardEvent};
use patternfly_yew::prelude::*;
use crate::backend::BackendClient;
use crate::config::PopupConfig;
use crate::controller::{ActiveView, ChatStatus, Effect, Msg, PopupState, SummaryPanel};
use crate::page_context::PageContext;
use crate::ui::components::{MessageList, SummaryBody};

/// Alert heading above the summary error; the body already starts with "Error:"
const SUMMARY_ERROR_TITLE: &str = "Summary unavailable";

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;
}

/// Applies messages to the shared state, redraws, and runs the resulting effects
#[derive(Clone)]
struct Dispatcher {
    state: Rc<RefCell<PopupState>>,
    redraw: UseForceUpdateHandle,
    backend: Rc<BackendClient>,
}

impl Dispatcher {
    fn send(&self, msg: Msg) {
        let effects = self.state.borrow_mut().update(msg);
        self.redraw.force_update();

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        let dispatcher = self.clone();

        match effect {
            Effect::FetchSummary { url } => {
                spawn_local(async move {
                    let result = dispatcher.backend.fetch_summary(&url).await;
                    dispatcher.send(Msg::SummaryLoaded(result));
                });
            }
            Effect::AskQuestion {
                pending_id,
                url,
                question,
            } => {
                spawn_local(async move {
                    let result = dispatcher.backend.ask(&url, &question).await;
                    dispatcher.send(Msg::AnswerReceived { pending_id, result });
                });
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_mut_ref(PopupState::new);
    let redraw = use_force_update();
    let backend = use_memo((), |_| {
        let client = BackendClient::new(&PopupConfig::from_build_env().backend_url);
        log::debug!("Using backend {}", client.base_url());
        client
    });

    let dispatcher = Dispatcher {
        state: state.clone(),
        redraw,
        backend,
    };

    // Look up the active tab once, on mount
    {
        let dispatcher = dispatcher.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let page = query_active_tab().await;
                dispatcher.send(Msg::TabResolved(page));
            });
            || ()
        });
    }

    let on_view_click = {
        let dispatcher = dispatcher.clone();
        move |view: ActiveView| {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: MouseEvent| {
                dispatcher.send(Msg::ViewSelected(view));
            })
        }
    };

    let on_start_chat = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_| {
            dispatcher.send(Msg::StartChatClicked);
        })
    };

    let on_input = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                dispatcher.send(Msg::InputChanged(input.value()));
            }
        })
    };

    let on_keypress = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                dispatcher.send(Msg::SendRequested);
            }
        })
    };

    let on_send = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_| {
            dispatcher.send(Msg::SendRequested);
        })
    };

    let snapshot = state.borrow();
    let view = snapshot.view();
    let awaiting = snapshot.chat_status() == ChatStatus::AwaitingResponse;

    let tab_class = |tab: ActiveView| {
        if view == tab { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }
    };
    let view_class = |tab: ActiveView| classes!("view", (view == tab).then_some("active"));

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Page Mind"}</h1>
            <p id="page-title" class="page-title">{snapshot.title().to_string()}</p>
            if let Some(page) = snapshot.page() {
                <p class="page-url">{page.url.clone()}</p>
            }

            // View selector
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={tab_class(ActiveView::Summary)}>
                        <button
                            id="tab-summary"
                            class="pf-v5-c-tabs__link"
                            onclick={on_view_click(ActiveView::Summary)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Summary"}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveView::Chat)}>
                        <button
                            id="tab-chat"
                            class="pf-v5-c-tabs__link"
                            onclick={on_view_click(ActiveView::Chat)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Chat"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            // Both views stay mounted so switching never loses the summary
            <div id="view-summary" class={view_class(ActiveView::Summary)}>
                {match snapshot.summary() {
                    SummaryPanel::Loading => html! {
                        <div class="loading-text-center">
                            <Spinner />
                            <p class="loading-text">{"Generating summary..."}</p>
                        </div>
                    },
                    SummaryPanel::Content(markup) => html! {
                        <div id="summary-content" class="summary-content">
                            <SummaryBody markup={markup.clone()} />
                        </div>
                    },
                    SummaryPanel::Error(message) => html! {
                        <div id="summary-error" class="message-top-margin">
                            <Alert r#type={AlertType::Danger} title={SUMMARY_ERROR_TITLE} inline={true}>
                                {message.clone()}
                            </Alert>
                        </div>
                    },
                }}
            </div>

            <div id="view-chat" class={view_class(ActiveView::Chat)}>
                if snapshot.chat_open() {
                    <div id="chat-interface" class="flex-column-gap">
                        <MessageList
                            messages={snapshot.transcript().messages().to_vec()}
                            revision={snapshot.transcript().revision()}
                        />
                        <div class="chat-input-row">
                            <input
                                id="chat-input"
                                type="text"
                                class="chat-input"
                                placeholder="Ask about this page..."
                                value={snapshot.input().to_string()}
                                oninput={on_input}
                                onkeypress={on_keypress}
                            />
                            <Button onclick={on_send} variant={ButtonVariant::Primary}>
                                {"Send"}
                            </Button>
                        </div>
                        if awaiting {
                            <p class="chat-status">{"Waiting for the backend..."}</p>
                        }
                    </div>
                } else {
                    <div id="chat-intro" class="flex-column-gap">
                        <p class="message-text">{"Have questions about this page? Ask away."}</p>
                        <Button onclick={on_start_chat} variant={ButtonVariant::Secondary} block={true}>
                            {"💬 Start Chat"}
                        </Button>
                    </div>
                }
            </div>

            <p class="footer-popup">
                {"Page Mind v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn query_active_tab() -> Option<PageContext> {
    match getActiveTab().await {
        Ok(tab_js) if tab_js.is_null() || tab_js.is_undefined() => None,
        Ok(tab_js) => match serde_wasm_bindgen::from_value::<PageContext>(tab_js) {
            Ok(page) => Some(page),
            Err(e) => {
                log::warn!("Failed to parse active tab: {:?}", e);
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to query active tab: {}", describe_js_error(&e));
            None
        }
    }
}

fn describe_js_error(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
