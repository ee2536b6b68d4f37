use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaceholderProps {
    pub title: AttrValue,
}

/// Menu destinations that have no screen of their own yet
#[function_component(PlaceholderPage)]
pub fn placeholder_page(props: &PlaceholderProps) -> Html {
    html! {
        <div class="p-6">
            <h1 class="text-2xl font-bold text-white">{props.title.clone()}</h1>
            <p class="text-gray-400">{"Coming soon..."}</p>
        </div>
    }
}
