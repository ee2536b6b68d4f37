use yew::prelude::*;
use yew_router::prelude::*;

use super::navbar::NavBar;
use crate::services::session;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

/// Dark shell: header with brand and role-gated menu, content below
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let current_route = use_route::<Route>().unwrap_or(Route::Customers);
    let role = use_state(session::current_role);

    html! {
        <div class="min-h-screen bg-gray-900 flex flex-col">
            // ===== TOP HEADER BAR =====
            <header class="bg-gray-800 border-b border-gray-700 h-14 flex-shrink-0 z-50">
                <div class="h-full flex items-center justify-between px-4">
                    // Logo
                    <Link<Route> to={Route::Customers} classes="flex items-center space-x-2">
                        <div class="w-8 h-8 bg-blue-500 rounded flex items-center justify-center">
                            <span class="text-white font-bold text-lg">{"A"}</span>
                        </div>
                        <span class="text-white font-semibold text-lg">{"Atelier"}</span>
                    </Link<Route>>

                    <NavBar role={(*role).clone()} current={current_route.title()} />
                </div>
            </header>

            // Main Content
            <main class="flex-1 overflow-auto bg-gray-900">
                { props.children.clone() }
            </main>
        </div>
    }
}
