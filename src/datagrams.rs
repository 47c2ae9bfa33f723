//! Fixed-layout datagrams exchanged with the device.
//!
//! Every record is a packed little-endian byte image: `#[repr(C)]` with only
//! alignment-1 field types, scalars wrapped in the `zerocopy` little-endian
//! types. The derives prove there is no padding, and the `const` assertions
//! below pin each wire size to the hand-computed sum of its fields, so the
//! layout contract never silently drifts with the compiler.
//!
//! Enum-valued fields are stored as raw integers (the device may report
//! values this build does not know); typed accessors run the fallible
//! conversions.

use zerocopy::byteorder::little_endian::{F32, I16, I64, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::commands::Command;
use crate::constants::RC_INPUT_CHANNELS;
use crate::enums::{
    ArmingStickDirection, BiquadMode, FlightMode, Port, RcInputMode, RcInputRole, RcInputType,
    RcOutputMode, RcSwitchPosition,
};
use crate::error::KFlyError;

/// Fixed-layout wire serialization contract.
///
/// `WIRE_SIZE` is the exact byte count of the packed image and equals the
/// length field of any packet carrying the datagram.
pub trait Datagram: Clone + Send + Sync + 'static {
    /// Exact number of bytes this datagram occupies on the wire.
    const WIRE_SIZE: usize;

    /// Append the packed little-endian image to `out`.
    fn serialize(&self, out: &mut Vec<u8>);

    /// Rebuild the datagram from its packed image.
    ///
    /// `bytes` must be exactly `WIRE_SIZE` long.
    fn deserialize(bytes: &[u8]) -> Result<Self, KFlyError>;
}

/// Datagrams the host may send to the device, with their wire command.
///
/// Types without this implementation are receive-only; attempting to
/// generate a packet for them does not compile.
pub trait TransmitDatagram: Datagram {
    /// Command byte under which this datagram is transmitted.
    const COMMAND: Command;
}

macro_rules! wire_datagram {
    ($($ty:ty => $size:expr),+ $(,)?) => {$(
        const _: () = assert!(core::mem::size_of::<$ty>() == $size);

        impl Datagram for $ty {
            const WIRE_SIZE: usize = $size;

            fn serialize(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(self.as_bytes());
            }

            fn deserialize(bytes: &[u8]) -> Result<Self, KFlyError> {
                Self::read_from_bytes(bytes).map_err(|_| KFlyError::SizeMismatch {
                    expected: $size,
                    actual: bytes.len(),
                })
            }
        }
    )+};
}

macro_rules! transmit_datagram {
    ($($ty:ty => $cmd:ident),+ $(,)?) => {$(
        impl TransmitDatagram for $ty {
            const COMMAND: Command = Command::$cmd;
        }
    )+};
}

macro_rules! empty_datagram {
    ($($ty:ident),+) => {$(
        impl Datagram for $ty {
            const WIRE_SIZE: usize = 0;

            fn serialize(&self, _out: &mut Vec<u8>) {}

            fn deserialize(bytes: &[u8]) -> Result<Self, KFlyError> {
                if bytes.is_empty() {
                    Ok($ty)
                } else {
                    Err(KFlyError::SizeMismatch { expected: 0, actual: bytes.len() })
                }
            }
        }
    )+};
}

/// Extract a NUL-padded string field.
fn cstr_lossy(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// NUL-padded truncating copy; the destination keeps a terminating NUL.
fn copy_truncated(dst: &mut [u8], src: &str) {
    let n = src.len().min(dst.len() - 1);
    dst[..n].copy_from_slice(&src.as_bytes()[..n]);
}

/// 3-dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct Vector3 {
    pub x: F32,
    pub y: F32,
    pub z: F32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: F32::new(x),
            y: F32::new(y),
            z: F32::new(z),
        }
    }
}

/// Quaternion, scalar component first.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct Quaternion {
    pub w: F32,
    pub x: F32,
    pub y: F32,
    pub z: F32,
}

impl Quaternion {
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self {
            w: F32::new(w),
            x: F32::new(x),
            y: F32::new(y),
            z: F32::new(z),
        }
    }
}

/// Acknowledge. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ack;

/// Ping. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ping;

empty_datagram!(Ack, Ping);

/// Running mode report (bootloader or flight program).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RunningMode {
    /// `b'B'` for the bootloader, `b'P'` for the flight program.
    pub sel: u8,
}

impl RunningMode {
    pub fn is_bootloader(&self) -> bool {
        self.sel == b'B'
    }
}

/// Manage the periodic publication of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ManageSubscription {
    /// Port the messages will be published on (raw [`Port`] value).
    pub port: u8,
    /// Command to subscribe to (raw [`Command`] value).
    pub cmd: u8,
    /// 1 to subscribe, 0 to unsubscribe.
    pub subscribe: u8,
    /// Milliseconds between publishes.
    pub delta_ms: U32,
}

impl ManageSubscription {
    pub fn new(port: Port, command: Command, subscribe: bool, delta_ms: u32) -> Self {
        Self {
            port: port.into(),
            cmd: command.into(),
            subscribe: subscribe as u8,
            delta_ms: U32::new(delta_ms),
        }
    }

    pub fn port(&self) -> Option<Port> {
        Port::try_from(self.port).ok()
    }

    pub fn command(&self) -> Option<Command> {
        Command::try_from(self.cmd).ok()
    }

    pub fn is_subscribe(&self) -> bool {
        self.subscribe != 0
    }
}

/// Version strings and unique identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct SystemStrings {
    /// User selectable name of the vehicle, NUL padded.
    pub vehicle_name: [u8; 48],
    /// Type of vehicle, NUL padded.
    pub vehicle_type: [u8; 48],
    /// Unique ID read from the MCU.
    pub unique_id: [u8; 12],
    /// KFly and git compile string, NUL padded.
    pub kfly_version: [u8; 96],
}

impl SystemStrings {
    pub fn vehicle_name(&self) -> String {
        cstr_lossy(&self.vehicle_name)
    }

    pub fn vehicle_type(&self) -> String {
        cstr_lossy(&self.vehicle_type)
    }

    pub fn kfly_version(&self) -> String {
        cstr_lossy(&self.kfly_version)
    }
}

/// General system status information.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct SystemStatus {
    /// Flight time in seconds.
    pub flight_time: F32,
    /// Up time in seconds.
    pub up_time: F32,
    /// CPU usage in [0, 1].
    pub cpu_usage: F32,
    /// Battery voltage in V.
    pub battery_voltage: F32,
    pub motors_armed: u8,
    pub in_air: u8,
    pub serial_interface_enabled: u8,
}

impl SystemStatus {
    pub fn motors_armed(&self) -> bool {
        self.motors_armed != 0
    }

    pub fn in_air(&self) -> bool {
        self.in_air != 0
    }

    pub fn serial_interface_enabled(&self) -> bool {
        self.serial_interface_enabled != 0
    }
}

/// Set the user definable ID strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct SetDeviceStrings {
    pub vehicle_name: [u8; 48],
    pub vehicle_type: [u8; 48],
}

impl SetDeviceStrings {
    /// Build from string slices; each is truncated to 47 bytes so the wire
    /// buffers stay NUL terminated.
    pub fn new(vehicle_name: &str, vehicle_type: &str) -> Self {
        let mut datagram = Self {
            vehicle_name: [0; 48],
            vehicle_type: [0; 48],
        };
        copy_truncated(&mut datagram.vehicle_name, vehicle_name);
        copy_truncated(&mut datagram.vehicle_type, vehicle_type);
        datagram
    }
}

/// Motor override values for ESC calibration and motor testing.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct MotorOverride {
    pub values: [F32; 8],
}

/// Control signals currently applied by the controllers.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ControlSignals {
    pub throttle: F32,
    /// Torque request around each body axis.
    pub torque: Vector3,
    pub motor_command: [F32; 8],
}

/// Control references currently tracked by the controllers.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ControllerReferences {
    pub attitude: Quaternion,
    pub rate: Vector3,
    pub throttle: F32,
}

/// Per-axis rate triple in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct AxisRates {
    pub roll: F32,
    pub pitch: F32,
    pub yaw: F32,
}

/// Rate limits shaping the stick response.
///
/// `max_rate >= center_rate`; manual rate is
/// `stick * center_rate + stick^3 * (max_rate - center_rate)`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RateLimits {
    pub max_rate: AxisRates,
    pub center_rate: AxisRates,
}

/// All limits in the control system.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ControllerLimits {
    pub rate: RateLimits,
    /// Attitude-mode angle limits in radians.
    pub max_angle_roll: F32,
    pub max_angle_pitch: F32,
    /// Velocity limits in m/s.
    pub max_velocity_horizontal: F32,
    pub max_velocity_vertical: F32,
}

/// Arming settings.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ArmSettings {
    /// Stick threshold for the arm/disarm logic to react.
    pub stick_threshold: F32,
    /// Minimum throttle when armed, keeps the propellers spinning.
    pub armed_min_throttle: F32,
    /// Stick direction to arm the controllers (raw [`ArmingStickDirection`]).
    pub stick_direction: u8,
    /// Seconds the sticks must be held to arm.
    pub arm_stick_time: u8,
    /// Seconds without throttle before automatic disarm.
    pub arm_zero_throttle_timeout: u8,
}

impl ArmSettings {
    pub fn stick_direction(&self) -> Option<ArmingStickDirection> {
        ArmingStickDirection::try_from(self.stick_direction).ok()
    }
}

/// PID gains for one axis controller.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct PidGains {
    pub p_gain: F32,
    pub i_gain: F32,
    pub d_gain: F32,
}

/// Generic controller data: gains for the roll, pitch and yaw controllers.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ControllerData {
    pub roll: PidGains,
    pub pitch: PidGains,
    pub yaw: PidGains,
}

/// Rate controller gains.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(transparent)]
pub struct RateControllerData(pub ControllerData);

/// Attitude controller gains.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(transparent)]
pub struct AttitudeControllerData(pub ControllerData);

/// Control filter settings.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ControlFilterSettings {
    /// D-term filter cutoff per axis in Hz.
    pub dterm_cutoff: [F32; 3],
    /// D-term filter type per axis (raw [`BiquadMode`]).
    pub dterm_filter_mode: [u8; 3],
}

impl ControlFilterSettings {
    pub fn filter_mode(&self, axis: usize) -> Option<BiquadMode> {
        BiquadMode::try_from(*self.dterm_filter_mode.get(axis)?).ok()
    }
}

/// Affine channel mixing matrix.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ChannelMix {
    /// Weights applied to throttle, pitch, roll and yaw for each output.
    pub weights: [[F32; 4]; 8],
    /// Output offsets, used for servos.
    pub offset: [F32; 8],
}

/// Calibration tables and roles for the RC inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RcInputSettings {
    /// Top value of each input, generally around 2000.
    pub ch_top: [U16; RC_INPUT_CHANNELS],
    /// Center value of each input, generally around 1500.
    pub ch_center: [U16; RC_INPUT_CHANNELS],
    /// Bottom value of each input, generally around 1000.
    pub ch_bottom: [U16; RC_INPUT_CHANNELS],
    /// Role of each channel (raw [`RcInputRole`]).
    pub role: [u8; RC_INPUT_CHANNELS],
    /// Type of each channel (raw [`RcInputType`]).
    pub input_type: [u8; RC_INPUT_CHANNELS],
    /// Per-channel reverse flags.
    pub ch_reverse: [u8; RC_INPUT_CHANNELS],
    pub use_rssi: u8,
}

impl RcInputSettings {
    pub fn role(&self, channel: usize) -> Option<RcInputRole> {
        RcInputRole::try_from(*self.role.get(channel)?).ok()
    }

    pub fn input_type(&self, channel: usize) -> Option<RcInputType> {
        RcInputType::try_from(*self.input_type.get(channel)?).ok()
    }
}

/// Output bank modes and enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RcOutputSettings {
    /// Mode of output bank 1 (raw [`RcOutputMode`]).
    pub mode_bank1: u8,
    /// Mode of output bank 2 (raw [`RcOutputMode`]).
    pub mode_bank2: u8,
    pub channel_enabled: [u8; 8],
}

impl RcOutputSettings {
    pub fn mode_bank1(&self) -> Option<RcOutputMode> {
        RcOutputMode::try_from(self.mode_bank1).ok()
    }

    pub fn mode_bank2(&self) -> Option<RcOutputMode> {
        RcOutputMode::try_from(self.mode_bank2).ok()
    }
}

/// Values and status of the RC input.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RcValues {
    /// Calibrated input value of each channel.
    pub calibrated_value: [F32; RC_INPUT_CHANNELS],
    /// Switch states (raw [`RcSwitchPosition`]).
    pub switches: [u8; 3],
    pub active_connection: u8,
    /// Number of active inputs; not all channels need be used.
    pub num_connections: U16,
    /// Raw input value of each channel.
    pub channel_value: [U16; RC_INPUT_CHANNELS],
    /// Signal strength in percent.
    pub rssi: U16,
    /// Frequency of the RSSI PWM.
    pub rssi_frequency: U16,
    /// Receiver mode (raw [`RcInputMode`]).
    pub mode: U16,
}

impl RcValues {
    pub fn switch(&self, index: usize) -> Option<RcSwitchPosition> {
        RcSwitchPosition::try_from(*self.switches.get(index)?).ok()
    }

    pub fn is_connected(&self) -> bool {
        self.active_connection != 0
    }

    pub fn mode(&self) -> Option<RcInputMode> {
        RcInputMode::try_from(self.mode.get()).ok()
    }
}

/// Calibrated IMU data.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ImuData {
    /// Accelerometer x, y, z in G.
    pub accelerometer: [F32; 3],
    /// Gyroscope x, y, z in rad/s.
    pub gyroscope: [F32; 3],
    /// Magnetometer x, y, z in normalized units.
    pub magnetometer: [F32; 3],
    /// IMU temperature in deg C.
    pub temperature: F32,
    /// Pressure in Pascal.
    pub pressure: F32,
    /// Internal clock time stamp in nanoseconds.
    pub timestamp_ns: I64,
}

/// Raw sensor data in the internal format, for calibration or logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RawImuData {
    pub accelerometer: [I16; 3],
    pub gyroscope: [I16; 3],
    pub magnetometer: [I16; 3],
    pub temperature: I16,
    pub pressure: U32,
    /// Internal clock time stamp in nanoseconds.
    pub timestamp_ns: I64,
}

/// IMU calibration converting the internal format into true values.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ImuCalibration {
    pub accelerometer_bias: [F32; 3],
    pub accelerometer_gain: [F32; 3],
    pub magnetometer_bias: [F32; 3],
    pub magnetometer_gain: [F32; 3],
    /// UNIX timestamp in seconds. Supplied by the caller; the library never
    /// samples the clock itself.
    pub timestamp: U32,
}

/// Attitude estimation states.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct EstimationAttitude {
    pub q: Quaternion,
    /// Angular rates in rad/s.
    pub angular_rate: Vector3,
    /// Angular rate biases in rad/s.
    pub rate_bias: Vector3,
}

/// Motion capture frame used by the internal estimation.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct MotionCaptureFrame {
    pub frame_number: U32,
    /// Position in meters.
    pub position: Vector3,
    pub attitude: Quaternion,
}

/// Control reference sent from the PC side.
///
/// On the wire this is a fixed 21-byte record: a 20-byte variant area padded
/// with zeros, then the [`FlightMode`] tag selecting the active variant. The
/// full envelope is emitted whatever the variant, matching the device's
/// expectation of a single wire size for the command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComputerControlReference {
    /// Direct motor control data.
    MotorDirect([u16; 8]),
    /// Motor control through the mixing matrix.
    MotorIndirect {
        roll: f32,
        pitch: f32,
        yaw: f32,
        throttle: f32,
    },
    /// Rate control references.
    Rate {
        roll: f32,
        pitch: f32,
        yaw: f32,
        throttle: f32,
    },
    /// Attitude Euler references (roll, pitch, yaw rate).
    AttitudeEuler {
        roll: f32,
        pitch: f32,
        yaw_rate: f32,
        throttle: f32,
    },
    /// Attitude quaternion references.
    Attitude {
        w: f32,
        x: f32,
        y: f32,
        z: f32,
        throttle: f32,
    },
}

impl ComputerControlReference {
    pub fn mode(&self) -> FlightMode {
        match self {
            Self::MotorDirect(_) => FlightMode::MotorDirect,
            Self::MotorIndirect { .. } => FlightMode::MotorIndirect,
            Self::Rate { .. } => FlightMode::Rate,
            Self::AttitudeEuler { .. } => FlightMode::AttitudeEuler,
            Self::Attitude { .. } => FlightMode::Attitude,
        }
    }
}

fn write_f32s(buf: &mut [u8], values: &[f32]) {
    for (chunk, value) in buf.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

fn read_f32(bytes: &[u8], index: usize) -> f32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[4 * index..4 * index + 4]);
    f32::from_le_bytes(raw)
}

impl Datagram for ComputerControlReference {
    const WIRE_SIZE: usize = 21;

    fn serialize(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; Self::WIRE_SIZE];

        match *self {
            Self::MotorDirect(values) => {
                for (chunk, value) in buf[..16].chunks_exact_mut(2).zip(values) {
                    chunk.copy_from_slice(&value.to_le_bytes());
                }
            }
            Self::MotorIndirect {
                roll,
                pitch,
                yaw,
                throttle,
            }
            | Self::Rate {
                roll,
                pitch,
                yaw,
                throttle,
            } => write_f32s(&mut buf[..16], &[roll, pitch, yaw, throttle]),
            Self::AttitudeEuler {
                roll,
                pitch,
                yaw_rate,
                throttle,
            } => write_f32s(&mut buf[..16], &[roll, pitch, yaw_rate, throttle]),
            Self::Attitude {
                w,
                x,
                y,
                z,
                throttle,
            } => write_f32s(&mut buf[..20], &[w, x, y, z, throttle]),
        }

        buf[20] = self.mode().into();
        out.extend_from_slice(&buf);
    }

    fn deserialize(bytes: &[u8]) -> Result<Self, KFlyError> {
        if bytes.len() != Self::WIRE_SIZE {
            return Err(KFlyError::SizeMismatch {
                expected: Self::WIRE_SIZE,
                actual: bytes.len(),
            });
        }

        let mode =
            FlightMode::try_from(bytes[20]).map_err(|_| KFlyError::InvalidFlightMode(bytes[20]))?;

        Ok(match mode {
            FlightMode::MotorDirect => {
                let mut values = [0u16; 8];
                for (i, value) in values.iter_mut().enumerate() {
                    *value = u16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]);
                }
                Self::MotorDirect(values)
            }
            FlightMode::MotorIndirect => Self::MotorIndirect {
                roll: read_f32(bytes, 0),
                pitch: read_f32(bytes, 1),
                yaw: read_f32(bytes, 2),
                throttle: read_f32(bytes, 3),
            },
            FlightMode::Rate => Self::Rate {
                roll: read_f32(bytes, 0),
                pitch: read_f32(bytes, 1),
                yaw: read_f32(bytes, 2),
                throttle: read_f32(bytes, 3),
            },
            FlightMode::AttitudeEuler => Self::AttitudeEuler {
                roll: read_f32(bytes, 0),
                pitch: read_f32(bytes, 1),
                yaw_rate: read_f32(bytes, 2),
                throttle: read_f32(bytes, 3),
            },
            FlightMode::Attitude => Self::Attitude {
                w: read_f32(bytes, 0),
                x: read_f32(bytes, 1),
                y: read_f32(bytes, 2),
                z: read_f32(bytes, 3),
                throttle: read_f32(bytes, 4),
            },
        })
    }
}

wire_datagram! {
    RunningMode => 1,
    ManageSubscription => 7,
    SystemStrings => 204,
    SystemStatus => 19,
    SetDeviceStrings => 96,
    MotorOverride => 32,
    ControlSignals => 48,
    ControllerReferences => 32,
    ControllerLimits => 40,
    ArmSettings => 11,
    ControllerData => 36,
    RateControllerData => 36,
    AttitudeControllerData => 36,
    ControlFilterSettings => 15,
    ChannelMix => 160,
    RcInputSettings => 145,
    RcOutputSettings => 10,
    RcValues => 108,
    ImuData => 52,
    RawImuData => 32,
    ImuCalibration => 52,
    EstimationAttitude => 40,
    MotionCaptureFrame => 32,
}

transmit_datagram! {
    ManageSubscription => ManageSubscriptions,
    SystemStrings => GetSystemStrings,
    SystemStatus => GetSystemStatus,
    SetDeviceStrings => SetDeviceStrings,
    MotorOverride => MotorOverride,
    ControllerLimits => SetControllerLimits,
    ArmSettings => SetArmSettings,
    RateControllerData => SetRateControllerData,
    AttitudeControllerData => SetAttitudeControllerData,
    ChannelMix => SetChannelMix,
    RcInputSettings => SetRcInputSettings,
    RcOutputSettings => SetRcOutputSettings,
    ImuCalibration => SetImuCalibration,
    ControlFilterSettings => SetControlFilters,
    ComputerControlReference => ComputerControlReference,
    MotionCaptureFrame => MotionCaptureMeasurement,
}
