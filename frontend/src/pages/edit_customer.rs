use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;
use yew::prelude::*;
use yew_router::prelude::*;

use atelier_shared::edit::{self, DELETE_PROMPT, SAVED_NOTICE};
use atelier_shared::{EditAction, EditSession, EditState};

use crate::components::{FileUploader, ImageGrid, PreviewModal};
use crate::services::{dialogs, HttpBackend};
use crate::Route;

/// Query string of the edit page: `/customers/edit?uuid=<id>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct EditPageState(EditState);

impl Reducible for EditPageState {
    type Action = EditAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let EditPageState(state) = Rc::unwrap_or_clone(self);
        Rc::new(EditPageState(state.reduce(action)))
    }
}

fn go_to(navigator: &Option<Navigator>, path: &str) {
    match (navigator, Route::recognize(path)) {
        (Some(navigator), Some(route)) => navigator.push(&route),
        _ => web_sys::console::warn_1(&format!("No route for {}", path).into()),
    }
}

#[function_component(EditCustomerPage)]
pub fn edit_customer_page() -> Html {
    let navigator = use_navigator();
    let uuid = use_location()
        .and_then(|location| location.query::<EditQuery>().ok())
        .and_then(|query| query.uuid);
    let state = use_reducer(EditPageState::default);
    let uploading = use_state(|| false);
    let saving = use_state(|| false);

    // Load customer
    {
        let state = state.clone();
        use_effect_with(uuid, move |uuid| {
            state.dispatch(EditAction::Settle(EditState::Loading));
            let uuid = uuid.clone();
            spawn_local(async move {
                let next = edit::load(&HttpBackend, uuid.as_deref()).await;
                if let EditState::Error(err) = &next {
                    dialogs::console_error("Error fetching customer data", err);
                }
                state.dispatch(EditAction::Settle(next));
            });
            || ()
        });
    }

    let on_files = {
        let state = state.clone();
        let uploading = uploading.clone();
        Callback::from(move |files: Vec<File>| {
            let state = state.clone();
            let uploading = uploading.clone();
            uploading.set(true);
            spawn_local(async move {
                match edit::upload_images(&HttpBackend, files).await {
                    Ok(assets) => state.dispatch(EditAction::AppendImages(assets)),
                    Err(err) => {
                        dialogs::console_error("Error uploading images", &err);
                        dialogs::alert(&err.to_string());
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_delete = {
        let state = state.clone();
        Callback::from(move |index: usize| {
            let Some(session) = state.0.session().cloned() else {
                return;
            };
            let state = state.clone();
            spawn_local(async move {
                let confirm = || dialogs::confirm(DELETE_PROMPT);
                match edit::delete_image(&HttpBackend, &session, index, confirm).await {
                    Ok(outcome) => {
                        if let Some(action) = outcome.into_action() {
                            state.dispatch(action);
                        }
                    }
                    Err(err) => {
                        dialogs::console_error("Error deleting image", &err);
                        dialogs::alert(&err.to_string());
                    }
                }
            });
        })
    };

    let on_open = {
        let state = state.clone();
        Callback::from(move |url: String| state.dispatch(EditAction::OpenPreview(url)))
    };

    let on_close = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(EditAction::ClosePreview))
    };

    let on_save = {
        let state = state.clone();
        let saving = saving.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(session) = state.0.session().cloned() else {
                return;
            };
            let saving = saving.clone();
            let navigator = navigator.clone();
            saving.set(true);
            spawn_local(async move {
                match edit::save(&HttpBackend, &session).await {
                    Ok(path) => {
                        dialogs::alert(SAVED_NOTICE);
                        go_to(&navigator, path);
                    }
                    Err(err) => {
                        dialogs::console_error("Error updating customer", &err);
                        dialogs::alert(&err.to_string());
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| go_to(&navigator, edit::LISTING_PATH))
    };

    let body = match &state.0 {
        EditState::Loading => html! {
            <div class="p-4 text-center text-gray-400">{"Loading..."}</div>
        },
        EditState::Error(err) => html! {
            <div class="p-4 rounded-lg bg-red-900 text-red-200">{err.to_string()}</div>
        },
        EditState::Ready(session) => html! {
            <CustomerForm
                session={session.clone()}
                uploading={*uploading}
                saving={*saving}
                {on_files}
                {on_delete}
                {on_open}
                {on_close}
                {on_save}
            />
        },
    };

    html! {
        <div class="p-6 space-y-6 max-w-4xl">
            // Header
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-white">{"Edit Customer"}</h1>
                <button
                    type="button"
                    onclick={on_back}
                    class="text-gray-300 hover:text-white px-3 py-2 rounded-lg hover:bg-gray-700"
                >
                    {"← Back to customers"}
                </button>
            </div>
            {body}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CustomerFormProps {
    session: EditSession,
    uploading: bool,
    saving: bool,
    on_files: Callback<Vec<File>>,
    on_delete: Callback<usize>,
    on_open: Callback<String>,
    on_close: Callback<()>,
    on_save: Callback<SubmitEvent>,
}

#[function_component(CustomerForm)]
fn customer_form(props: &CustomerFormProps) -> Html {
    let record = props.session.original();
    let deadline = record
        .deadline
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    html! {
        <form onsubmit={props.on_save.clone()} class="bg-gray-800 rounded-lg p-6 space-y-6">
            <div>
                <label class="block text-sm font-medium text-gray-300 mb-1">{"Customer Name"}</label>
                <input
                    type="text"
                    value={record.customer_name.clone()}
                    readonly=true
                    class="w-full bg-gray-700 text-white rounded-lg px-3 py-2"
                />
            </div>

            <div>
                <label class="block text-sm font-medium text-gray-300 mb-1">{"Phone Number"}</label>
                <div class="flex items-center space-x-2">
                    <input
                        type="tel"
                        value={record.phone_number.clone()}
                        readonly=true
                        class="flex-1 bg-gray-700 text-white rounded-lg px-3 py-2"
                    />
                    if let Some(link) = record.whatsapp_link() {
                        <a
                            href={link}
                            target="_blank"
                            rel="noopener noreferrer"
                            class="bg-green-600 hover:bg-green-700 text-white px-3 py-2 rounded-lg text-sm"
                        >
                            {"WhatsApp"}
                        </a>
                    }
                </div>
            </div>

            <div class="space-y-3">
                <div class="flex items-center justify-between">
                    <label class="text-sm font-medium text-gray-300">{"Images"}</label>
                    <FileUploader on_files={props.on_files.clone()} disabled={props.uploading} />
                </div>
                <ImageGrid
                    images={props.session.images().to_vec()}
                    on_open={props.on_open.clone()}
                    on_delete={props.on_delete.clone()}
                />
            </div>

            <div>
                <label class="block text-sm font-medium text-gray-300 mb-1">{"Deadline"}</label>
                <input
                    type="date"
                    value={deadline}
                    readonly=true
                    class="bg-gray-700 text-white rounded-lg px-3 py-2"
                />
            </div>

            <div class="flex justify-end">
                <button
                    type="submit"
                    disabled={props.saving}
                    class="bg-blue-600 hover:bg-blue-700 disabled:opacity-50 text-white px-6 py-2 rounded-lg font-medium"
                >
                    if props.saving { {"Saving..."} } else { {"Save"} }
                </button>
            </div>

            if let Some(url) = props.session.preview() {
                <PreviewModal url={url.to_string()} on_close={props.on_close.clone()} />
            }
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_shared::{Customer, ImageAsset};
    use wasm_bindgen_test::*;

    fn ready() -> Rc<EditPageState> {
        let record = Customer {
            id: "c-1".to_string(),
            customer_name: "Noor".to_string(),
            phone_number: "+1 555".to_string(),
            images: vec![ImageAsset::from_url("/a.jpg")],
            deadline: None,
        };
        Rc::new(EditPageState(EditState::Ready(EditSession::new("c-1", record))))
    }

    #[wasm_bindgen_test]
    fn test_page_state_delegates_to_reducer() {
        let state = ready().reduce(EditAction::OpenPreview("/a.jpg".to_string()));
        assert_eq!(state.0.session().and_then(|s| s.preview()), Some("/a.jpg"));

        let state = state.reduce(EditAction::RemoveImage { index: 0, url: "/a.jpg".to_string() });
        assert!(state.0.session().is_some_and(|s| s.images().is_empty()));
    }
}
