/// A backend-owned document as the console sees it.
///
/// Static metadata drives tab labels and log lines; instance methods give the
/// id and a human label.
pub trait Entity {
    /// Backend `_id`
    fn id(&self) -> &str;

    /// Short human label for tables, refs and toasts
    fn display_name(&self) -> String;

    /// Index in the console (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Backend collection / route root (e.g. "sale")
    fn collection_name() -> &'static str;

    /// UI name, singular
    fn element_name() -> &'static str;

    /// UI name, plural
    fn list_name() -> &'static str;

    /// Full name (e.g. "a001_sale")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
