/// auth.html: the page Pocket redirects to after the consent prompt
use super::status::StatusView;
use crate::browser::BrowserServices;
use crate::flow::{Status, run_auth_callback};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(AuthCallbackApp)]
pub fn auth_callback_app() -> Html {
    let status = use_state(|| None::<Status>);

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let sink = move |s: &Status| status.set(Some(s.clone()));
                match BrowserServices::connect() {
                    Ok(services) => {
                        run_auth_callback(&services.auth_flow(), &sink).await;
                    }
                    Err(e) => {
                        log::error!("{:?}", e);
                        sink(&Status::failed(&e));
                    }
                }
            });
            || ()
        });
    }

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Save to Pocket"}</h1>
            <StatusView status={(*status).clone()} />
        </div>
    }
}
