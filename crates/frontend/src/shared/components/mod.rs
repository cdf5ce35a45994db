pub mod form_field;
pub mod pagination_controls;
pub mod stat_card;
pub mod table;
pub mod ui;
