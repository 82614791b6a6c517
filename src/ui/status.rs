/// Renders a flow `Status` in the extension page body
use crate::flow::Status;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Busy,
    Success,
    Danger,
}

/// Tone, heading and body text for a status
fn presentation(status: &Status) -> (Tone, String, String) {
    match status {
        Status::Authorizing | Status::Saving { .. } => {
            (Tone::Busy, String::new(), status.to_string())
        }
        Status::Saved { title, excerpt } => {
            (Tone::Success, format!("Saved {}", title), excerpt.clone())
        }
        Status::Authorized { .. } => (Tone::Success, "Authorized".to_string(), status.to_string()),
        Status::Failed { .. } => (Tone::Danger, "Error".to_string(), status.to_string()),
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusViewProps {
    #[prop_or_default]
    pub status: Option<Status>,
}

#[function_component(StatusView)]
pub fn status_view(props: &StatusViewProps) -> Html {
    let Some(status) = &props.status else {
        return html! {};
    };

    match presentation(status) {
        (Tone::Busy, _, text) => html! {
            <div class="loading-text-center">
                <Spinner />
                <p class="loading-text">{text}</p>
            </div>
        },
        (Tone::Success, heading, body) => html! {
            <Alert r#type={AlertType::Success} title={heading} inline={true}>
                {body}
            </Alert>
        },
        (Tone::Danger, heading, body) => html! {
            <Alert r#type={AlertType::Danger} title={heading} inline={true}>
                {body}
            </Alert>
        },
    }
}
