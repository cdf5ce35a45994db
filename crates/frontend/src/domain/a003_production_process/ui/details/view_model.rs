use contracts::domain::a003_production_process::ProductionProcess;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a003_production_process::api;

/// Read-only process detail, reloadable.
#[derive(Clone, Copy)]
pub struct ProcessDetailsVm {
    pub process: RwSignal<Option<ProductionProcess>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
}

impl ProcessDetailsVm {
    pub fn new(id: String) -> Self {
        let vm = Self {
            process: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
        };
        vm.load(id);
        vm
    }

    pub fn load(&self, id: String) {
        let process = self.process;
        let error = self.error;
        let loading = self.loading;
        loading.set(true);
        spawn_local(async move {
            match api::fetch_process(&id).await {
                Ok(p) => {
                    process.set(Some(p));
                    error.set(None);
                }
                Err(e) => {
                    log::warn!("production process {}: {}", id, e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    }
}
