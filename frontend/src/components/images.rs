use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use atelier_shared::ImageAsset;

// ===== FILE UPLOADER =====

#[derive(Properties, PartialEq)]
pub struct FileUploaderProps {
    pub on_files: Callback<Vec<File>>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Button over a hidden multi-file picker limited to images
#[function_component(FileUploader)]
pub fn file_uploader(props: &FileUploaderProps) -> Html {
    let input_ref = use_node_ref();

    let open_picker = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_change = {
        let on_files = props.on_files.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
                return;
            };
            let files: Vec<File> = input
                .files()
                .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                .unwrap_or_default();
            // Clear so picking the same file again still fires `change`
            input.set_value("");
            if !files.is_empty() {
                on_files.emit(files);
            }
        })
    };

    html! {
        <div>
            <input
                ref={input_ref}
                type="file"
                accept="image/*"
                multiple=true
                class="hidden"
                onchange={on_change}
            />
            <button
                type="button"
                onclick={open_picker}
                disabled={props.disabled}
                class="bg-blue-600 hover:bg-blue-700 disabled:opacity-50 text-white px-4 py-2 rounded-lg text-sm font-medium"
            >
                if props.disabled { {"Uploading..."} } else { {"Upload Images"} }
            </button>
        </div>
    }
}

// ===== IMAGE GRID =====

/// Records may hold the same URL twice, so keys carry the position too.
fn grid_key(index: usize, url: &str) -> String {
    format!("{}-{}", index, url)
}

#[derive(Properties, PartialEq)]
pub struct ImageGridProps {
    pub images: Vec<ImageAsset>,
    pub on_open: Callback<String>,
    pub on_delete: Callback<usize>,
}

#[function_component(ImageGrid)]
pub fn image_grid(props: &ImageGridProps) -> Html {
    if props.images.is_empty() {
        return html! {
            <p class="text-gray-400 text-sm">{"No images uploaded yet."}</p>
        };
    }

    let columns = props.images.len().min(4);

    html! {
        <div
            class="grid gap-4"
            style={format!("grid-template-columns: repeat({}, minmax(0, 1fr));", columns)}
        >
            { for props.images.iter().enumerate().map(|(index, image)| {
                let open = {
                    let on_open = props.on_open.clone();
                    let url = image.url.clone();
                    Callback::from(move |_: MouseEvent| on_open.emit(url.clone()))
                };
                let delete = props.on_delete.reform(move |_: MouseEvent| index);

                html! {
                    <div key={grid_key(index, &image.url)} class="relative group bg-gray-800 rounded-lg overflow-hidden">
                        <img
                            src={image.url.clone()}
                            alt={format!("Image {}", index + 1)}
                            class="w-full h-40 object-cover cursor-pointer"
                            onclick={open}
                        />
                        <button
                            type="button"
                            onclick={delete}
                            class="absolute top-2 right-2 bg-red-600 hover:bg-red-700 text-white text-xs px-2 py-1 rounded opacity-0 group-hover:opacity-100"
                        >
                            {"Delete"}
                        </button>
                    </div>
                }
            }) }
        </div>
    }
}

// ===== PREVIEW MODAL =====

#[derive(Properties, PartialEq)]
pub struct PreviewModalProps {
    pub url: AttrValue,
    pub on_close: Callback<()>,
}

#[function_component(PreviewModal)]
pub fn preview_modal(props: &PreviewModalProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-75 flex items-center justify-center z-50" onclick={close.clone()}>
            <div class="relative max-w-4xl max-h-screen p-4" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <img src={props.url.clone()} alt="Preview" class="max-w-full max-h-screen rounded-lg" />
                <button
                    type="button"
                    onclick={close}
                    class="absolute top-6 right-6 bg-gray-800 hover:bg-gray-700 text-white rounded-full w-8 h-8"
                >
                    {"×"}
                </button>
            </div>
        </div>
    }
}
