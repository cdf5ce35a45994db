//! Client-side sorting for list tables.
use std::cmp::Ordering;

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Header suffix: ▲/▼ on the sorted column, ⇅ elsewhere
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sortable-header table__sortable-header--active"
    } else {
        "table__sortable-header"
    }
}

/// Missing values sort last.
pub fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, Option<f64>);

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "amount" => cmp_opt_f64(self.1, other.1),
                _ => cmp_text(self.0, other.0),
            }
        }
    }

    #[test]
    fn test_sort_list() {
        let mut rows = vec![Row("b", None), Row("A", Some(2.0)), Row("c", Some(1.0))];
        sort_list(&mut rows, "name", true);
        assert_eq!(rows.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["A", "b", "c"]);
        sort_list(&mut rows, "amount", true);
        assert_eq!(rows.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["c", "A", "b"]);
        sort_list(&mut rows, "amount", false);
        assert_eq!(rows[0].0, "b");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("price", "price", true), " ▲");
        assert_eq!(get_sort_indicator("price", "price", false), " ▼");
        assert_eq!(get_sort_indicator("price", "qty", true), " ⇅");
    }
}
