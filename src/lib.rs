//! Host-side communication library for the KFly flight controller.
//!
//! The device speaks a framed binary protocol: SLIP-delimited frames whose
//! body is `[cmd | len | payload | crc16]`. This crate decodes incoming
//! byte streams into strongly typed datagrams fanned out to registered
//! handlers, and generates frames for transmission. It performs no I/O;
//! bytes in and out of the serial link are the caller's business.
//!
//! ```no_run
//! use kfly_comm::{Codec, Command};
//! use kfly_comm::datagrams::ImuData;
//!
//! fn on_imu(data: ImuData) {
//!     println!("accelerometer: {:?}", data.accelerometer);
//! }
//!
//! let codec = Codec::new();
//! codec.register_callback(on_imu);
//!
//! // Ask the device to stream IMU data every 10 ms, then pump received
//! // bytes through the codec.
//! let request = Codec::generate_subscribe(
//!     Command::GetImuData,
//!     10,
//!     true,
//!     kfly_comm::enums::Port::Usb,
//! )?;
//! // port.write_all(&request)?;
//! // codec.parse(&port.read(...)?);
//! # Ok::<(), kfly_comm::KFlyError>(())
//! ```

pub mod codec;
pub mod commands;
pub mod constants;
pub mod crc;
pub mod datagrams;
pub mod director;
pub mod enums;
pub mod error;
pub mod slip;

mod packet;

pub use codec::Codec;
pub use commands::Command;
pub use datagrams::{Datagram, TransmitDatagram};
pub use director::Dispatchable;
pub use enums::Port;
pub use error::KFlyError;
