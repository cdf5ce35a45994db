//! Tab content registry: tab.key -> view.
//!
//! List tabs use the aggregate key (`a001_sale`), detail tabs append
//! `_detail_<id>`.

use crate::dashboards::d400_sensors::ui::SensorsDashboard;
use crate::dashboards::d401_machine_status::ui::MachineStatusDashboard;
use crate::domain::a001_sale::ui::list::SaleList;
use crate::domain::a001_sale::ui::upcoming::UpcomingSales;
use crate::domain::a002_assignment::ui::list::AssignmentList;
use crate::domain::a003_production_process::ui::details::ProductionProcessDetails;
use crate::domain::a003_production_process::ui::list::ProductionProcessList;
use crate::domain::a004_bom::ui::list::BomList;
use crate::domain::a005_payment::ui::details::PaymentDetails;
use crate::domain::a005_payment::ui::list::PaymentList;
use crate::domain::a006_invoice::ui::details::InvoiceLookup;
use crate::domain::a007_employee::ui::details::EmployeeDetails;
use crate::domain::a007_employee::ui::list::EmployeeList;
use crate::domain::a008_role::ui::list::RoleList;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

/// Id part of a detail key.
pub fn detail_id(key: &str, prefix: &str) -> Option<String> {
    key.strip_prefix(prefix)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    if let Some(id) = detail_id(key, "a003_production_process_detail_") {
        return view! { <ProductionProcessDetails id=id on_close=close /> }.into_any();
    }
    if let Some(id) = detail_id(key, "a005_payment_detail_") {
        return view! { <PaymentDetails id=id on_close=close /> }.into_any();
    }
    if let Some(id) = detail_id(key, "a007_employee_detail_") {
        return view! { <EmployeeDetails id=id on_close=close /> }.into_any();
    }

    match key {
        "a001_sale" => view! { <SaleList /> }.into_any(),
        "a001_sale_upcoming" => view! { <UpcomingSales /> }.into_any(),
        "a002_assignment" => view! { <AssignmentList /> }.into_any(),
        "a003_production_process" => view! { <ProductionProcessList /> }.into_any(),
        "a004_bom" => view! { <BomList /> }.into_any(),
        "a005_payment" => view! { <PaymentList /> }.into_any(),
        "a006_invoice" => view! { <InvoiceLookup /> }.into_any(),
        "a007_employee" => view! { <EmployeeList /> }.into_any(),
        "a008_role" => view! { <RoleList /> }.into_any(),
        "d400_sensors" => view! { <SensorsDashboard /> }.into_any(),
        "d401_machine_status" => view! { <MachineStatusDashboard /> }.into_any(),
        _ => {
            log!("Unknown tab type: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::detail_id;

    #[test]
    fn test_detail_id() {
        assert_eq!(
            detail_id("a005_payment_detail_p1", "a005_payment_detail_"),
            Some("p1".to_string())
        );
        assert_eq!(detail_id("a005_payment_detail_", "a005_payment_detail_"), None);
        assert_eq!(detail_id("a005_payment", "a005_payment_detail_"), None);
    }
}
