//! The KFly codec: SLIP transport, packet verification and typed dispatch.

use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::commands::Command;
use crate::datagrams::{
    Ack, ArmSettings, AttitudeControllerData, ChannelMix, ComputerControlReference,
    ControlFilterSettings, ControlSignals, ControllerLimits, ControllerReferences,
    EstimationAttitude, ImuCalibration, ImuData, ManageSubscription, MotionCaptureFrame,
    MotorOverride, Ping, RateControllerData, RawImuData, RcInputSettings, RcOutputSettings,
    RcValues, RunningMode, SetDeviceStrings, SystemStatus, SystemStrings, TransmitDatagram,
};
use crate::director::{DatagramDirector, Dispatchable};
use crate::enums::Port;
use crate::error::KFlyError;
use crate::packet;
use crate::slip::{self, SlipDecoder};

/// Host-side codec for the KFly serial protocol.
///
/// Bytes received from the device go into [`parse`](Self::parse); every
/// frame that survives framing, length, CRC and command checks is handed to
/// the handlers registered for its datagram type. Malformed frames are
/// dropped silently and the decoder resynchronizes on the next frame
/// boundary.
///
/// Frames for transmission are built with the associated `generate_*`
/// functions; the codec never writes to any transport itself.
///
/// `parse` may be called from several threads; the decoder lock serializes
/// them. Handlers run on the thread that fed the completing byte, with the
/// decoder lock and the dispatched type's callback lock held: a handler
/// must not feed this codec, and must not register or release handlers for
/// the type it is currently receiving (other types are fine).
pub struct Codec {
    parser: Mutex<SlipDecoder>,
    callbacks: DatagramDirector,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    pub fn new() -> Self {
        Self {
            parser: Mutex::new(SlipDecoder::new()),
            callbacks: DatagramDirector::new(),
        }
    }

    /// Feed received bytes into the decoder, dispatching every completed
    /// packet before returning.
    pub fn parse(&self, data: &[u8]) {
        let mut parser = self.parser.lock().unwrap();

        for &byte in data {
            if let Some(body) = parser.push_byte(byte) {
                self.process_body(&body);
            }
        }
    }

    /// Single-byte variant of [`parse`](Self::parse).
    pub fn parse_byte(&self, byte: u8) {
        self.parse(std::slice::from_ref(&byte));
    }

    /// Register a free function for datagrams of type `T`.
    pub fn register_callback<T: Dispatchable>(&self, callback: fn(T)) {
        self.callbacks.register(callback);
    }

    /// Register a method bound to `object` for datagrams of type `T`.
    pub fn register_method_callback<O, T>(&self, object: &Arc<O>, method: fn(&O, T))
    where
        O: Send + Sync + 'static,
        T: Dispatchable,
    {
        self.callbacks.register_method(object, method);
    }

    /// Remove every registration of `callback`; returns the number removed.
    pub fn release_callback<T: Dispatchable>(&self, callback: fn(T)) -> usize {
        self.callbacks.release(callback)
    }

    /// Remove every registration of `method` bound to `object`; returns the
    /// number removed.
    pub fn release_method_callback<O, T>(&self, object: &Arc<O>, method: fn(&O, T)) -> usize
    where
        O: Send + Sync + 'static,
        T: Dispatchable,
    {
        self.callbacks.release_method(object, method)
    }

    /// Build the framed, CRC-stamped wire image of `datagram`.
    ///
    /// With `ack` set, the command byte requests an acknowledgement from the
    /// device; nothing else about the frame changes.
    pub fn generate_packet<T: TransmitDatagram>(
        datagram: &T,
        ack: bool,
    ) -> Result<Vec<u8>, KFlyError> {
        let body = packet::assemble_datagram(datagram, ack)?;
        Ok(slip::encode(&body))
    }

    /// Build the wire image of a payload-less command.
    pub fn generate_command(command: Command, ack: bool) -> Result<Vec<u8>, KFlyError> {
        let body = packet::assemble_body(command, &[], ack)?;
        Ok(slip::encode(&body))
    }

    /// Build a subscription request: publish `command` every `delta_ms`
    /// milliseconds on `port`.
    pub fn generate_subscribe(
        command: Command,
        delta_ms: u32,
        subscribe: bool,
        port: Port,
    ) -> Result<Vec<u8>, KFlyError> {
        let subscription = ManageSubscription::new(port, command, subscribe, delta_ms);
        Self::generate_packet(&subscription, false)
    }

    /// Build an unsubscription request for `command` on `port`.
    pub fn generate_unsubscribe(command: Command, port: Port) -> Result<Vec<u8>, KFlyError> {
        Self::generate_subscribe(command, 0, false, port)
    }

    /// Build the clear-all-subscriptions request.
    pub fn generate_unsubscribe_all() -> Result<Vec<u8>, KFlyError> {
        Self::generate_subscribe(Command::None, 0xFFFF_FFFF, false, Port::Same)
    }

    fn process_body(&self, body: &[u8]) {
        match packet::verify(body) {
            Ok((command, payload)) => self.dispatch(command, payload),
            Err(error) => trace!(%error, "dropping frame"),
        }
    }

    /// Route a verified payload to the datagram type bound to `command`.
    ///
    /// Get/Set command pairs share one datagram type; a payload-less Get
    /// *request* fails the size check of its data type and is dropped, so
    /// only actual data frames reach the handlers.
    fn dispatch(&self, command: Command, payload: &[u8]) {
        match command {
            Command::Ack => self.run::<Ack>(payload),
            Command::Ping => self.run::<Ping>(payload),
            Command::GetRunningMode => self.run::<RunningMode>(payload),
            Command::ManageSubscriptions => self.run::<ManageSubscription>(payload),
            Command::GetSystemStrings => self.run::<SystemStrings>(payload),
            Command::GetSystemStatus => self.run::<SystemStatus>(payload),
            Command::SetDeviceStrings => self.run::<SetDeviceStrings>(payload),
            Command::MotorOverride => self.run::<MotorOverride>(payload),
            Command::GetControllerReferences => self.run::<ControllerReferences>(payload),
            Command::GetControlSignals => self.run::<ControlSignals>(payload),
            Command::GetControllerLimits | Command::SetControllerLimits => {
                self.run::<ControllerLimits>(payload)
            }
            Command::GetArmSettings | Command::SetArmSettings => {
                self.run::<ArmSettings>(payload)
            }
            Command::GetRateControllerData | Command::SetRateControllerData => {
                self.run::<RateControllerData>(payload)
            }
            Command::GetAttitudeControllerData | Command::SetAttitudeControllerData => {
                self.run::<AttitudeControllerData>(payload)
            }
            Command::GetChannelMix | Command::SetChannelMix => self.run::<ChannelMix>(payload),
            Command::GetRcInputSettings | Command::SetRcInputSettings => {
                self.run::<RcInputSettings>(payload)
            }
            Command::GetRcOutputSettings | Command::SetRcOutputSettings => {
                self.run::<RcOutputSettings>(payload)
            }
            Command::GetRcValues => self.run::<RcValues>(payload),
            Command::GetImuData => self.run::<ImuData>(payload),
            Command::GetRawImuData => self.run::<RawImuData>(payload),
            Command::GetImuCalibration | Command::SetImuCalibration => {
                self.run::<ImuCalibration>(payload)
            }
            Command::GetEstimationAttitude => self.run::<EstimationAttitude>(payload),
            Command::GetControlFilters | Command::SetControlFilters => {
                self.run::<ControlFilterSettings>(payload)
            }
            Command::ComputerControlReference => self.run::<ComputerControlReference>(payload),
            Command::MotionCaptureMeasurement => self.run::<MotionCaptureFrame>(payload),
            _ => trace!(%command, "no datagram bound to command, dropping"),
        }
    }

    fn run<T: Dispatchable>(&self, payload: &[u8]) {
        if payload.len() != T::WIRE_SIZE {
            trace!(
                expected = T::WIRE_SIZE,
                actual = payload.len(),
                "payload size does not match datagram, dropping"
            );
            return;
        }

        match T::deserialize(payload) {
            Ok(datagram) => self.callbacks.execute(datagram),
            Err(error) => trace!(%error, "undecodable payload, dropping"),
        }
    }
}
