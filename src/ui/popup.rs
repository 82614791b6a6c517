/// Toolbar popup: save the active tab, authorizing first if needed
use super::status::StatusView;
use crate::browser::BrowserServices;
use crate::flow::Status;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(PopupApp)]
pub fn popup_app() -> Html {
    let status = use_state(|| None::<Status>);

    // Run the save flow once, when the popup opens
    {
        let status = status.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let sink = move |s: &Status| status.set(Some(s.clone()));
                match BrowserServices::connect() {
                    Ok(services) => {
                        services.save_flow().run(&sink).await;
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
