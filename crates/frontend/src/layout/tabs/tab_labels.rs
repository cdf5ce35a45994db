//! Tab titles.
//!
//! Aggregate lists take `list_name` from contracts; the rest are fixed.

use contracts::domain::a001_sale::Sale;
use contracts::domain::a002_assignment::Assignment;
use contracts::domain::a003_production_process::ProductionProcess;
use contracts::domain::a004_bom::Bom;
use contracts::domain::a005_payment::Payment;
use contracts::domain::a006_invoice::Invoice;
use contracts::domain::a007_employee::Employee;
use contracts::domain::a008_role::Role;
use contracts::domain::common::Entity;

/// Readable title for a tab key. Unknown keys give "".
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_sale" => Sale::list_name(),
        "a001_sale_upcoming" => "Upcoming deliveries",
        "a002_assignment" => Assignment::list_name(),
        "a003_production_process" => ProductionProcess::list_name(),
        "a004_bom" => Bom::list_name(),
        "a005_payment" => Payment::list_name(),
        "a006_invoice" => Invoice::list_name(),
        "a007_employee" => Employee::list_name(),
        "a008_role" => Role::list_name(),
        "d400_sensors" => "Sensors",
        "d401_machine_status" => "Machine status",
        _ => "",
    }
}

/// "<entity> · <identifier>", e.g. `Sale · SO-0042`
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a001_sale"), "Sales");
        assert_eq!(tab_label_for_key("a003_production_process"), "Production status");
        assert_eq!(tab_label_for_key("nope"), "");
        assert_eq!(detail_tab_label("Sale", "SO-0042"), "Sale · SO-0042");
    }
}
