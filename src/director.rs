//! Type-indexed callback registry.
//!
//! Each datagram type gets its own callback list behind its own mutex, so
//! registering or releasing a handler for one type never blocks dispatch of
//! another. The set of dispatchable types is closed at compile time: the
//! [`Dispatchable`] impls generated below are the only index into the
//! director, and a handler for any other type does not compile.
//!
//! Handlers are identified by an `(object, method)` pointer pair for
//! removal. Free functions use object 0, so two registrations of the same
//! function are indistinguishable, as are two registrations of the same
//! method bound to the same object.

use std::sync::{Arc, Mutex};

use crate::datagrams::{
    Ack, ArmSettings, AttitudeControllerData, ChannelMix, ComputerControlReference,
    ControlFilterSettings, ControlSignals, ControllerLimits, ControllerReferences, Datagram,
    EstimationAttitude, ImuCalibration, ImuData, ManageSubscription, MotionCaptureFrame,
    MotorOverride, Ping, RateControllerData, RawImuData, RcInputSettings, RcOutputSettings,
    RcValues, RunningMode, SetDeviceStrings, SystemStatus, SystemStrings,
};

/// Stable identity of a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CallbackKey {
    /// Address of the bound object; 0 for free functions.
    object: usize,
    /// Address of the function or method.
    method: usize,
}

struct Entry<T> {
    key: CallbackKey,
    call: Box<dyn Fn(T) + Send + Sync>,
}

/// Ordered callback list for a single datagram type.
pub struct CallbackList<T> {
    entries: Mutex<Vec<Entry<T>>>,
}

impl<T: Datagram> CallbackList<T> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn register(&self, key: CallbackKey, call: Box<dyn Fn(T) + Send + Sync>) {
        self.entries.lock().unwrap().push(Entry { key, call });
    }

    fn release(&self, key: CallbackKey) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.key != key);
        before - entries.len()
    }

    /// Invoke every handler in registration order.
    ///
    /// The list's lock is held for the duration of the calls; see the
    /// deadlock contract on [`DatagramDirector`].
    fn execute(&self, datagram: T) {
        let entries = self.entries.lock().unwrap();
        for entry in entries.iter() {
            (entry.call)(datagram.clone());
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// A datagram type accepted by the [`DatagramDirector`].
pub trait Dispatchable: Datagram {
    #[doc(hidden)]
    fn callbacks(director: &DatagramDirector) -> &CallbackList<Self>;
}

macro_rules! define_director {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        /// Registry of handler lists, one per datagram type.
        ///
        /// A handler invoked during dispatch for type `T` must not call
        /// `register`/`release`/`dispatch` for `T` on the same director from
        /// the same thread: `T`'s lock is held across the handler calls and
        /// the re-entrant acquisition deadlocks. Touching *other* types from
        /// a handler is safe; the locks are independent.
        pub struct DatagramDirector {
            $($field: CallbackList<$ty>,)+
        }

        impl DatagramDirector {
            pub fn new() -> Self {
                Self {
                    $($field: CallbackList::new(),)+
                }
            }
        }

        impl Default for DatagramDirector {
            fn default() -> Self {
                Self::new()
            }
        }

        $(impl Dispatchable for $ty {
            fn callbacks(director: &DatagramDirector) -> &CallbackList<Self> {
                &director.$field
            }
        })+
    };
}

define_director! {
    ack: Ack,
    ping: Ping,
    running_mode: RunningMode,
    manage_subscription: ManageSubscription,
    system_strings: SystemStrings,
    system_status: SystemStatus,
    set_device_strings: SetDeviceStrings,
    motor_override: MotorOverride,
    control_signals: ControlSignals,
    controller_references: ControllerReferences,
    controller_limits: ControllerLimits,
    arm_settings: ArmSettings,
    rate_controller_data: RateControllerData,
    attitude_controller_data: AttitudeControllerData,
    channel_mix: ChannelMix,
    rc_input_settings: RcInputSettings,
    rc_output_settings: RcOutputSettings,
    rc_values: RcValues,
    imu_data: ImuData,
    raw_imu_data: RawImuData,
    imu_calibration: ImuCalibration,
    estimation_attitude: EstimationAttitude,
    control_filter_settings: ControlFilterSettings,
    computer_control_reference: ComputerControlReference,
    motion_capture_frame: MotionCaptureFrame,
}

impl DatagramDirector {
    /// Register a free function for datagrams of type `T`.
    ///
    /// Duplicate registrations are kept; each dispatch then invokes the
    /// function once per registration.
    pub fn register<T: Dispatchable>(&self, callback: fn(T)) {
        let key = CallbackKey {
            object: 0,
            method: callback as usize,
        };
        T::callbacks(self).register(key, Box::new(callback));
    }

    /// Register a method bound to `object` for datagrams of type `T`.
    ///
    /// The list keeps a clone of the `Arc`, so the object outlives the
    /// registration.
    pub fn register_method<O, T>(&self, object: &Arc<O>, method: fn(&O, T))
    where
        O: Send + Sync + 'static,
        T: Dispatchable,
    {
        let key = CallbackKey {
            object: Arc::as_ptr(object) as usize,
            method: method as usize,
        };
        let object = Arc::clone(object);
        T::callbacks(self).register(key, Box::new(move |datagram| method(&object, datagram)));
    }

    /// Remove every registration of `callback`; returns the number removed.
    pub fn release<T: Dispatchable>(&self, callback: fn(T)) -> usize {
        T::callbacks(self).release(CallbackKey {
            object: 0,
            method: callback as usize,
        })
    }

    /// Remove every registration of `method` bound to `object`; returns the
    /// number removed.
    pub fn release_method<O, T>(&self, object: &Arc<O>, method: fn(&O, T)) -> usize
    where
        O: Send + Sync + 'static,
        T: Dispatchable,
    {
        T::callbacks(self).release(CallbackKey {
            object: Arc::as_ptr(object) as usize,
            method: method as usize,
        })
    }

    /// Hand `datagram` to every handler registered for `T`, in registration
    /// order, on the calling thread.
    pub fn execute<T: Dispatchable>(&self, datagram: T) {
        T::callbacks(self).execute(datagram);
    }

    /// Number of handlers currently registered for `T`.
    pub fn callback_count<T: Dispatchable>(&self) -> usize {
        T::callbacks(self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static PING_HITS: AtomicUsize = AtomicUsize::new(0);

    fn count_ping(_: Ping) {
        PING_HITS.fetch_add(1, Ordering::SeqCst);
    }

    fn ignore_ping(_: Ping) {}

    #[test]
    fn register_dispatch_release() {
        let director = DatagramDirector::new();
        PING_HITS.store(0, Ordering::SeqCst);

        director.register(count_ping);
        director.register(count_ping);
        director.register(ignore_ping);
        assert_eq!(director.callback_count::<Ping>(), 3);

        director.execute(Ping);
        assert_eq!(PING_HITS.load(Ordering::SeqCst), 2);

        // Both registrations of the same function share one identity.
        assert_eq!(director.release(count_ping), 2);
        assert_eq!(director.callback_count::<Ping>(), 1);

        director.execute(Ping);
        assert_eq!(PING_HITS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn bound_methods_compare_by_object_and_method() {
        struct Sink {
            hits: AtomicUsize,
        }

        impl Sink {
            fn on_ack(&self, _: Ack) {
                self.hits.fetch_add(1, Ordering::SeqCst);
            }

            fn on_ack_other(&self, _: Ack) {}
        }

        let director = DatagramDirector::new();
        let first = Arc::new(Sink {
            hits: AtomicUsize::new(0),
        });
        let second = Arc::new(Sink {
            hits: AtomicUsize::new(0),
        });

        director.register_method(&first, Sink::on_ack);
        director.register_method(&first, Sink::on_ack_other);
        director.register_method(&second, Sink::on_ack);

        director.execute(Ack);
        assert_eq!(first.hits.load(Ordering::SeqCst), 1);
        assert_eq!(second.hits.load(Ordering::SeqCst), 1);

        // Releasing one binding leaves the same method on other objects.
        assert_eq!(director.release_method(&first, Sink::on_ack), 1);
        assert_eq!(director.callback_count::<Ack>(), 2);

        director.execute(Ack);
        assert_eq!(first.hits.load(Ordering::SeqCst), 1);
        assert_eq!(second.hits.load(Ordering::SeqCst), 2);
    }
}
