pub mod d400_sensors;
pub mod d401_machine_status;
