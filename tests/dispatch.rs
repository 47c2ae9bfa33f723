//! Tests for handler registration, ordering and identity-based release.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::*;

static FREE_HITS: AtomicUsize = AtomicUsize::new(0);

fn on_ack(_: Ack) {
    FREE_HITS.fetch_add(1, Ordering::SeqCst);
}

fn on_ack_other(_: Ack) {}

struct Tagged {
    tag: u8,
    log: Arc<Mutex<Vec<u8>>>,
}

impl Tagged {
    fn on_ping(&self, _: Ping) {
        self.log.lock().unwrap().push(self.tag);
    }
}

fn ack_frame() -> Vec<u8> {
    build_frame(u8::from(Command::Ack), &[])
}

#[test]
fn handlers_fire_in_registration_order() {
    let codec = Codec::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::new(Tagged {
        tag: 1,
        log: Arc::clone(&log),
    });
    let second = Arc::new(Tagged {
        tag: 2,
        log: Arc::clone(&log),
    });
    let third = Arc::new(Tagged {
        tag: 3,
        log: Arc::clone(&log),
    });

    codec.register_method_callback(&first, Tagged::on_ping);
    codec.register_method_callback(&second, Tagged::on_ping);
    codec.register_method_callback(&third, Tagged::on_ping);

    codec.parse(PING_FRAME);
    codec.parse(PING_FRAME);

    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3, 1, 2, 3]);
}

#[test]
fn release_removes_every_matching_registration() {
    let codec = Codec::new();
    FREE_HITS.store(0, Ordering::SeqCst);

    codec.register_callback(on_ack);
    codec.register_callback(on_ack);
    codec.register_callback(on_ack_other);

    codec.parse(&ack_frame());
    assert_eq!(FREE_HITS.load(Ordering::SeqCst), 2);

    assert_eq!(codec.release_callback(on_ack), 2);
    assert_eq!(codec.release_callback(on_ack), 0);

    codec.parse(&ack_frame());
    assert_eq!(FREE_HITS.load(Ordering::SeqCst), 2);

    assert_eq!(codec.release_callback(on_ack_other), 1);
}

#[test]
fn bound_handlers_release_by_object_identity() {
    let codec = Codec::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::new(Tagged {
        tag: 1,
        log: Arc::clone(&log),
    });
    let second = Arc::new(Tagged {
        tag: 2,
        log: Arc::clone(&log),
    });

    codec.register_method_callback(&first, Tagged::on_ping);
    codec.register_method_callback(&second, Tagged::on_ping);

    // Same method, different object: only the requested binding goes away.
    assert_eq!(codec.release_method_callback(&first, Tagged::on_ping), 1);

    codec.parse(PING_FRAME);
    assert_eq!(*log.lock().unwrap(), vec![2]);
}

#[test]
fn handlers_are_per_type() {
    let codec = Codec::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let pings = Arc::new(Tagged {
        tag: 7,
        log: Arc::clone(&log),
    });
    codec.register_method_callback(&pings, Tagged::on_ping);

    // An Ack frame does not touch Ping handlers.
    codec.parse(&ack_frame());
    assert!(log.lock().unwrap().is_empty());

    codec.parse(PING_FRAME);
    assert_eq!(*log.lock().unwrap(), vec![7]);
}

#[test]
fn cross_type_registration_from_handler_is_safe() {
    struct Chainer {
        codec: Arc<Codec>,
        acks: Arc<Recorder<Ack>>,
    }

    impl Chainer {
        fn on_ping(&self, _: Ping) {
            // Registering for a different type while Ping's lock is held.
            self.codec
                .register_method_callback(&self.acks, Recorder::record);
        }
    }

    let codec = Arc::new(Codec::new());
    let acks = Recorder::<Ack>::new();
    let chainer = Arc::new(Chainer {
        codec: Arc::clone(&codec),
        acks: Arc::clone(&acks),
    });

    codec.register_method_callback(&chainer, Chainer::on_ping);

    codec.parse(PING_FRAME);
    codec.parse(&ack_frame());

    assert_eq!(acks.count(), 1);
}
