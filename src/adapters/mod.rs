//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to             |
//! |------------|------------------|-------------------------|
//! | `hardware` | InputPort        | ESP32 GPIO buttons      |
//! |            | OutputPort       | ESP32 GPIO relay / LED  |
//! |            | IrReceiverPort   | ESP32 RMT peripheral    |
//! | `log_sink` | EventSink        | Serial log output       |
//! | `nvs`      | ByteStore        | NVS / in-memory store   |
//! |            | ConfigPort       |                         |
//! | `time`     | ClockPort        | ESP32 system timer      |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
