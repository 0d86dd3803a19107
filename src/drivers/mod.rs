//! Input/output drivers and the RMT capture peripheral.

pub mod button;
pub mod indicator;
pub mod ir_receiver;
pub mod relay;
