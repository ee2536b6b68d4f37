use yew::prelude::*;
use yew_router::prelude::*;

use atelier_shared::nav::visible_entries;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub role: String,
    /// Title of the page being shown; its own entry is left out.
    #[prop_or_default]
    pub current: AttrValue,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let navigator = use_navigator();
    let entries = visible_entries(&props.role, &props.current);

    html! {
        <nav class="flex items-center space-x-1">
            { for entries.into_iter().map(|entry| {
                let onclick = {
                    let navigator = navigator.clone();
                    let path = entry.path;
                    Callback::from(move |_: MouseEvent| {
                        match (navigator.as_ref(), Route::recognize(path)) {
                            (Some(navigator), Some(route)) => navigator.push(&route),
                            _ => web_sys::console::warn_1(&format!("No route for {}", path).into()),
                        }
                    })
                };

                html! {
                    <button
                        key={entry.path}
                        {onclick}
                        class="px-3 py-2 text-sm font-medium text-gray-300 hover:text-white border-b-2 border-transparent hover:border-gray-500"
                    >
                        {entry.title}
                    </button>
                }
            }) }
        </nav>
    }
}
