use yew::prelude::*;
use yew_router::prelude::*;
use wasm_bindgen_futures::spawn_local;

use atelier_shared::Customer;

use crate::pages::edit_customer::EditQuery;
use crate::services::{customers, dialogs};
use crate::Route;

#[function_component(CustomersPage)]
pub fn customers_page() -> Html {
    let customers_data = use_state(|| None::<Vec<Customer>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    // Load customers
    {
        let customers_data = customers_data.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match customers::list().await {
                    Ok(data) => customers_data.set(Some(data)),
                    Err(e) => {
                        dialogs::console_error("Error fetching customers", &e);
                        error.set(Some(e.message));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    html! {
        <div class="p-6 space-y-6">
            // Header
            <div>
                <h1 class="text-2xl font-bold text-white">{"Customers"}</h1>
                <p class="text-gray-400">{"Measurements, photos and delivery dates"}</p>
            </div>

            if *loading {
                <div class="p-4 text-center text-gray-400">{"Loading customers..."}</div>
            } else if let Some(message) = (*error).clone() {
                <div class="p-4 rounded-lg bg-red-900 text-red-200">{message}</div>
            } else if let Some(list) = (*customers_data).as_ref().filter(|list| !list.is_empty()) {
                <div class="bg-gray-800 rounded-lg overflow-hidden">
                    <table class="min-w-full divide-y divide-gray-700">
                        <thead class="bg-gray-700">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-300 uppercase">{"Name"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-300 uppercase">{"Phone"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-300 uppercase">{"Images"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-300 uppercase">{"Deadline"}</th>
                                <th class="px-6 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-700">
                            { for list.iter().map(|customer| html! { <CustomerRow customer={customer.clone()} /> }) }
                        </tbody>
                    </table>
                </div>
            } else {
                <div class="p-4 text-center text-gray-400">{"No customers found"}</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CustomerRowProps {
    customer: Customer,
}

#[function_component(CustomerRow)]
fn customer_row(props: &CustomerRowProps) -> Html {
    let customer = &props.customer;
    let query = EditQuery { uuid: Some(customer.id.clone()) };

    html! {
        <tr class="hover:bg-gray-700">
            <td class="px-6 py-4 text-white">{&customer.customer_name}</td>
            <td class="px-6 py-4 text-gray-300">{&customer.phone_number}</td>
            <td class="px-6 py-4 text-gray-300">{customer.images.len()}</td>
            <td class="px-6 py-4 text-gray-300">
                {customer.deadline.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="px-6 py-4 text-right">
                <Link<Route, EditQuery> to={Route::EditCustomer} query={Some(query)} classes="text-blue-400 hover:text-blue-300">
                    {"Edit"}
                </Link<Route, EditQuery>>
            </td>
        </tr>
    }
}
