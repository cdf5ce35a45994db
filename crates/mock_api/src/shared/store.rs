//! In-memory documents the mock serves, seeded from fixtures.
//!
//! References are stored as bare ids and populated on the way out, the way
//! the real backend populates `party`, `product_id`, `role`, ...

use contracts::dashboards::d400_sensors::DeviceDataRecord;
use contracts::dashboards::d401_machine_status::MachineRecord;
use contracts::domain::a001_sale::Sale;
use contracts::domain::a002_assignment::Assignment;
use contracts::domain::a003_production_process::ProductionProcess;
use contracts::domain::a004_bom::Bom;
use contracts::domain::a005_payment::Payment;
use contracts::domain::a006_invoice::Invoice;
use contracts::domain::a007_employee::Employee;
use contracts::domain::a008_role::Role;
use contracts::domain::common::{Entity, PartySummary, ProductSummary, Ref, UserSummary};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const EMBEDDED_FIXTURES: &str = include_str!("../../fixtures/seed.json");

/// Rows kept in `devicedata/get-device-data`
pub const DEVICE_HISTORY_LIMIT: usize = 200;

/// Uploaded invoice image
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub current_user_id: Option<String>,
    #[serde(default)]
    pub parties: Vec<PartySummary>,
    #[serde(default)]
    pub products: Vec<ProductSummary>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub boms: Vec<Bom>,
    #[serde(default)]
    pub processes: Vec<ProductionProcess>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub machines: Vec<MachineRecord>,
    #[serde(default)]
    pub device_data: Vec<DeviceDataRecord>,
    #[serde(skip)]
    pub uploads: HashMap<String, StoredFile>,
}

impl Store {
    pub fn embedded() -> anyhow::Result<Self> {
        Ok(serde_json::from_str(EMBEDDED_FIXTURES)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn current_user(&self) -> Option<&Employee> {
        match &self.current_user_id {
            Some(id) => self.employees.iter().find(|e| e.id == *id),
            None => self.employees.first(),
        }
    }

    pub fn user_summary(&self, id: &str) -> Option<UserSummary> {
        self.employees.iter().find(|e| e.id == id).map(|e| UserSummary {
            id: e.id.clone(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
        })
    }

    pub fn party_ref(&self, id: &str) -> Ref<PartySummary> {
        populate(&self.parties, id)
    }

    pub fn product_ref(&self, id: &str) -> Ref<ProductSummary> {
        populate(&self.products, id)
    }

    pub fn user_ref(&self, id: &str) -> Ref<UserSummary> {
        match self.user_summary(id) {
            Some(user) => Ref::Populated(user),
            None => Ref::Id(id.to_string()),
        }
    }

    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    pub fn sale_mut(&mut self, id: &str) -> Option<&mut Sale> {
        self.sales.iter_mut().find(|s| s.id == id)
    }

    pub fn process_mut(&mut self, id: &str) -> Option<&mut ProductionProcess> {
        self.processes.iter_mut().find(|p| p.id == id)
    }

    pub fn populated_employee(&self, employee: &Employee) -> Employee {
        let mut out = employee.clone();
        out.role = employee
            .role
            .as_ref()
            .map(|r| populate(&self.roles, r.id()));
        out
    }

    pub fn populated_sale(&self, sale: &Sale) -> Sale {
        let mut out = sale.clone();
        out.party = sale.party.as_ref().map(|r| self.party_ref(r.id()));
        out.product_id = sale.product_id.as_ref().map(|r| self.product_ref(r.id()));
        out.user_id = sale.user_id.as_ref().map(|r| self.user_ref(r.id()));
        out
    }

    pub fn populated_assignment(&self, assignment: &Assignment) -> Assignment {
        let mut out = assignment.clone();
        out.sale_id = assignment
            .sale_id
            .as_ref()
            .map(|r| match self.sale(r.id()) {
                Some(sale) => Ref::Populated(self.populated_sale(sale)),
                None => Ref::Id(r.id().to_string()),
            });
        out.assined_to = assignment.assined_to.as_ref().map(|r| self.user_ref(r.id()));
        out.assined_by = assignment.assined_by.as_ref().map(|r| self.user_ref(r.id()));
        out
    }

    pub fn populated_bom(&self, bom: &Bom) -> Bom {
        let mut out = bom.clone();
        if let Some(fg) = out.finished_good.as_mut() {
            fg.item = fg.item.as_ref().map(|r| self.product_ref(r.id()));
        }
        for rm in out.raw_materials.iter_mut() {
            rm.item = rm.item.as_ref().map(|r| self.product_ref(r.id()));
        }
        out
    }

    pub fn populated_process(&self, process: &ProductionProcess) -> ProductionProcess {
        let mut out = process.clone();
        if let Some(fg) = out.finished_good.as_mut() {
            fg.item = fg.item.as_ref().map(|r| self.product_ref(r.id()));
        }
        for rm in out.raw_materials.iter_mut() {
            rm.item = rm.item.as_ref().map(|r| self.product_ref(r.id()));
        }
        out.bom = process.bom.as_ref().map(|r| {
            match self.boms.iter().find(|b| b.id == r.id()) {
                Some(bom) => Ref::Populated(bom.clone()),
                None => Ref::Id(r.id().to_string()),
            }
        });
        out
    }

    pub fn populated_payment(&self, payment: &Payment) -> Payment {
        let mut out = payment.clone();
        out.sale_id = payment.sale_id.as_ref().map(|r| match self.sale(r.id()) {
            Some(sale) => Ref::Populated(self.populated_sale(sale)),
            None => Ref::Id(r.id().to_string()),
        });
        out
    }

    pub fn populated_invoice(&self, invoice: &Invoice) -> Invoice {
        let mut out = invoice.clone();
        out.party = invoice.party.as_ref().map(|r| self.party_ref(r.id()));
        for item in out.items.iter_mut() {
            item.item = item.item.as_ref().map(|r| self.product_ref(r.id()));
        }
        out
    }

    pub fn push_device_data(&mut self, record: DeviceDataRecord) {
        self.device_data.push(record);
        if self.device_data.len() > DEVICE_HISTORY_LIMIT {
            let overflow = self.device_data.len() - DEVICE_HISTORY_LIMIT;
            self.device_data.drain(..overflow);
        }
    }

    /// Next `SO-NNNN` number after the highest one in use.
    pub fn next_order_id(&self) -> String {
        let highest = self
            .sales
            .iter()
            .filter_map(|s| s.order_id.as_deref())
            .filter_map(|o| o.strip_prefix("SO-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("SO-{:04}", highest + 1)
    }
}

fn populate<T: Entity + Clone>(items: &[T], id: &str) -> Ref<T> {
    match items.iter().find(|item| item.id() == id) {
        Some(item) => Ref::Populated(item.clone()),
        None => Ref::Id(id.to_string()),
    }
}

/// Fresh document id (24 hex chars like the backend's ObjectIds)
pub fn new_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_sale::SaleStage;

    #[test]
    fn test_embedded_fixtures_are_consistent() {
        let store = Store::embedded().unwrap();
        assert_eq!(store.current_user().and_then(|u| u.first_name.as_deref()), Some("Asha"));
        assert_eq!(store.sales.len(), 5);

        // every reference in the seed resolves
        for sale in &store.sales {
            let populated = store.populated_sale(sale);
            assert!(populated.party.as_ref().and_then(|p| p.populated()).is_some(), "{}", sale.id);
            assert!(populated.product_id.as_ref().and_then(|p| p.populated()).is_some(), "{}", sale.id);
        }
        for employee in &store.employees {
            let populated = store.populated_employee(employee);
            assert!(populated.role.as_ref().and_then(|r| r.populated()).is_some());
        }

        let stages: Vec<SaleStage> = store.sales.iter().map(SaleStage::of).collect();
        assert!(stages.contains(&SaleStage::Pending));
        assert!(stages.contains(&SaleStage::InProduction));
        assert!(stages.contains(&SaleStage::Completed));
    }

    #[test]
    fn test_next_order_id_and_history_cap() {
        let mut store = Store::embedded().unwrap();
        assert_eq!(store.next_order_id(), "SO-0006");

        for i in 0..(DEVICE_HISTORY_LIMIT + 5) {
            store.push_device_data(DeviceDataRecord {
                id: i.to_string(),
                ..Default::default()
            });
        }
        assert_eq!(store.device_data.len(), DEVICE_HISTORY_LIMIT);
        assert_eq!(store.device_data.last().map(|r| r.id.as_str()), Some("204"));
    }

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
