//! Secondary wire enums carried inside datagram payloads.
//!
//! Datagrams store these as raw integers (the device may send values a host
//! build does not know); the typed accessors on the datagram structs run
//! the `TryFromPrimitive` conversions.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flight modes selectable via computer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FlightMode {
    /// Control each motor individually.
    MotorDirect = 1,
    /// Control the motors through the mixing matrix.
    MotorIndirect = 2,
    /// Control via rate references.
    Rate = 3,
    /// Control via Euler references.
    AttitudeEuler = 4,
    /// Control via attitude references.
    Attitude = 5,
}

/// Port selector for subscriptions, USB or one of the UARTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Port {
    Usb = 0,
    Aux1 = 1,
    Aux2 = 2,
    Aux3 = 3,
    /// Publish on the same port the request arrived on.
    Same = 0xFF,
}

/// Input capture channel role selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RcInputRole {
    Throttle = 0,
    Pitch = 1,
    Roll = 2,
    Yaw = 3,
    Aux1 = 4,
    Aux2 = 5,
    Aux3 = 6,
    /// Non-latching switch that arms the flight controller.
    ArmNonLatch = 7,
    /// Latching switch that hands control to the serial link.
    EnableSerialControl = 8,
    FlightMode = 9,
    /// Unused channel.
    Off = 0xFF,
}

/// Input capture channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RcInputType {
    Analog = 1,
    ThreeState = 2,
    OnOff = 3,
}

/// Receiver input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum RcInputMode {
    Cppm = 1,
    Pwm = 2,
}

/// Position of a switch-type RC input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RcSwitchPosition {
    Undefined = 0,
    NotSwitch = 1,
    Bottom = 2,
    Center = 3,
    Top = 4,
}

/// Output period of an RC output bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RcOutputMode {
    Pwm400Hz = 0,
    Pwm50Hz = 1,
    /// OneShot125.
    OneShot = 2,
}

/// Stick direction for arming the controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ArmingStickDirection {
    NotSet = 0,
    PitchMin = 1,
    PitchMax = 2,
    RollMin = 3,
    RollMax = 4,
    YawMin = 5,
    YawMax = 6,
    NonLatchingSwitch = 7,
}

/// D-term biquad filter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BiquadMode {
    Lowpass = 0,
    Notch = 1,
}
