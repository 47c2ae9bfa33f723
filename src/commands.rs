use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Command byte identifiers, from the view of KFly.
///
/// The integer values are part of the wire protocol and must not change.
/// `None` is reserved: it never appears as the command byte of a frame, but
/// it is a valid *field* value inside a subscription datagram (used by the
/// clear-all-subscriptions message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Command {
    /// The zero command is not allowed on the wire.
    None = 0,
    Ack = 1,
    Ping = 2,
    DebugMessage = 3,
    GetRunningMode = 4,
    ManageSubscriptions = 5,

    // Info, ID and save commands.
    GetSystemStrings = 16,
    GetSystemStatus = 17,
    SetDeviceStrings = 18,
    SaveToFlash = 19,
    EraseFlash = 20,

    // Controller commands.
    MotorOverride = 23,
    GetControllerReferences = 24,
    GetControlSignals = 25,
    GetControllerLimits = 26,
    SetControllerLimits = 27,
    GetArmSettings = 28,
    SetArmSettings = 29,
    GetRateControllerData = 30,
    SetRateControllerData = 31,
    GetAttitudeControllerData = 32,
    SetAttitudeControllerData = 33,
    GetVelocityControllerData = 34,
    SetVelocityControllerData = 35,
    GetPositionControllerData = 36,
    SetPositionControllerData = 37,
    GetChannelMix = 39,
    SetChannelMix = 40,

    // RC commands.
    GetRcInputSettings = 41,
    SetRcInputSettings = 42,
    GetRcOutputSettings = 43,
    SetRcOutputSettings = 44,
    GetRcValues = 45,

    // Sensor commands.
    GetImuData = 46,
    GetRawImuData = 47,
    GetImuCalibration = 48,
    SetImuCalibration = 49,

    // Estimation commands.
    GetEstimationRate = 50,
    GetEstimationAttitude = 51,
    GetEstimationVelocity = 52,
    GetEstimationPosition = 53,
    GetEstimationAllStates = 54,
    ResetEstimation = 55,
    GetControlFilters = 56,
    SetControlFilters = 57,

    /// New control reference from the PC side.
    ComputerControlReference = 126,
    /// New motion capture measurement.
    MotionCaptureMeasurement = 127,
}
