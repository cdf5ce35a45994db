pub mod api;
pub mod dates;
pub mod socket_io;
pub mod validation;
