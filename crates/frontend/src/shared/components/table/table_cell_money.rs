use super::number_format::format_rupees;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned rupee amount, `-` when absent.
#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<Option<f64>>,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) => format_rupees(v),
        None => "-".to_string(),
    };

    let cell_style = if bold {
        "text-align: right; font-weight: 600"
    } else {
        "text-align: right"
    };

    view! {
        <TableCell>
            <TableCellLayout>
                <span style=cell_style>{formatted_text}</span>
            </TableCellLayout>
        </TableCell>
    }
}
