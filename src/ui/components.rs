/// Reusable UI components

use yew::prelude::*;
use web_sys::Element;
use crate::summary::{SummaryBlock, SummaryMarkup};
use crate::transcript::ChatMessage;

#[derive(Properties, PartialEq)]
pub struct SummaryBodyProps {
    pub markup: SummaryMarkup,
}

#[function_component(SummaryBody)]
pub fn summary_body(props: &SummaryBodyProps) -> Html {
    let blocks = props.markup.blocks().iter().map(|block| match block {
        SummaryBlock::ListItem(text) => html! { <li>{text}</li> },
        SummaryBlock::Paragraph(text) => html! { <p>{text}</p> },
    });

    if props.markup.is_list() {
        html! { <ul class="summary-list">{for blocks}</ul> }
    } else {
        html! { <>{for blocks}</> }
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageListProps {
    pub messages: Vec<ChatMessage>,
    /// Changes on every append; used to keep the newest entry in view
    pub revision: u64,
}

#[function_component(MessageList)]
pub fn message_list(props: &MessageListProps) -> Html {
    let container = use_node_ref();

    {
        let container = container.clone();
        use_effect_with(props.revision, move |_| {
            if let Some(element) = container.cast::<Element>() {
                element.set_scroll_top(element.scroll_height());
            }
            || ()
        });
    }

    html! {
        <div class="chat-messages" ref={container}>
            {for props.messages.iter().map(|message| {
                let class = classes!(
                    "message",
                    message.sender.as_class(),
                    message.pending.then_some("pending"),
                );
                html! {
                    <div
                        id={message.id.clone()}
                        class={class}
                        style={message.pending.then_some("font-style: italic;")}
                    >
                        {&message.text}
                    </div>
                }
            })}
        </div>
    }
}
