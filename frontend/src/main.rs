use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod pages;
mod services;

use components::layout::Layout;
use pages::{
    customers::CustomersPage,
    edit_customer::EditCustomerPage,
    placeholder::PlaceholderPage,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/customers")]
    Customers,
    #[at("/customers/edit")]
    EditCustomer,
    #[at("/summary")]
    Summary,
    #[at("/calendar")]
    Calendar,
    #[at("/orders")]
    Orders,
    #[at("/sudo/users/add")]
    AddUsers,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Page title, matched against menu entry titles by the nav bar.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home | Route::Customers => "Customers",
            Route::EditCustomer => "Edit Customer",
            Route::Summary => "Summary",
            Route::Calendar => "Calendar",
            Route::Orders => "Orders",
            Route::AddUsers => "Add Users",
            Route::NotFound => "Not Found",
        }
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Customers} /> },
        Route::Customers => html! { <CustomersPage /> },
        Route::EditCustomer => html! { <EditCustomerPage /> },
        Route::Summary | Route::Calendar | Route::Orders | Route::AddUsers => {
            html! { <PlaceholderPage title={routes.title()} /> }
        }
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-900">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-white">{"404"}</h1>
                    <p class="text-xl mt-4 text-gray-400">{"Page Not Found"}</p>
                </div>
            </div>
        },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Layout>
                <Switch<Route> render={switch} />
            </Layout>
        </BrowserRouter>
    }
}

fn load_stylesheet(href: &str) -> Option<()> {
    let document = web_sys::window()?.document()?;
    let head = document.head()?;

    let link = document.create_element("link").ok()?;
    link.set_attribute("href", href).ok()?;
    link.set_attribute("rel", "stylesheet").ok()?;
    head.append_child(&link).ok()?;
    Some(())
}

fn main() {
    // Load Tailwind CSS
    if load_stylesheet("https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css").is_none() {
        web_sys::console::warn_1(&"Could not attach stylesheet".into());
    }

    yew::Renderer::<App>::new().render();
}
