//! Threaded tests: one thread feeds the receive path while others churn the
//! registry for unrelated types.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use common::*;

static ACK_HITS: AtomicUsize = AtomicUsize::new(0);

fn on_ack(_: Ack) {
    ACK_HITS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn feed_and_register_on_distinct_types() {
    const FRAMES: usize = 200;
    const CHURNS: usize = 500;

    let codec = Arc::new(Codec::new());

    let imu = Recorder::<ImuData>::new();
    codec.register_method_callback(&imu, Recorder::record);

    let mut stream = Vec::new();
    for i in 0..FRAMES {
        let mut payload = vec![0u8; ImuData::WIRE_SIZE];
        payload[0] = i as u8;
        stream.extend(build_frame(u8::from(Command::GetImuData), &payload));
    }

    thread::scope(|scope| {
        let feeder_codec = Arc::clone(&codec);
        scope.spawn(move || {
            // Odd chunk size so frames straddle parse calls.
            for chunk in stream.chunks(7) {
                feeder_codec.parse(chunk);
            }
        });

        let churn_codec = Arc::clone(&codec);
        scope.spawn(move || {
            for _ in 0..CHURNS {
                churn_codec.register_callback(on_ack);
                assert_eq!(churn_codec.release_callback(on_ack), 1);
            }
            // Leave a known number registered.
            churn_codec.register_callback(on_ack);
            churn_codec.register_callback(on_ack);
        });
    });

    assert_eq!(imu.count(), FRAMES);

    ACK_HITS.store(0, Ordering::SeqCst);
    codec.parse(&build_frame(u8::from(Command::Ack), &[]));
    assert_eq!(ACK_HITS.load(Ordering::SeqCst), 2);
}

#[test]
fn parallel_feeders_are_serialized() {
    const PER_THREAD: usize = 100;

    let codec = Arc::new(Codec::new());
    let pings = Recorder::<Ping>::new();
    codec.register_method_callback(&pings, Recorder::record);

    thread::scope(|scope| {
        for _ in 0..4 {
            let codec = Arc::clone(&codec);
            scope.spawn(move || {
                // Whole frames per call: the decoder lock keeps each frame
                // intact regardless of interleaving across threads.
                for _ in 0..PER_THREAD {
                    codec.parse(PING_FRAME);
                }
            });
        }
    });

    assert_eq!(pings.count(), 4 * PER_THREAD);
}

#[test]
fn registration_on_one_type_does_not_block_dispatch_on_another() {
    let codec = Arc::new(Codec::new());

    let imu = Recorder::<ImuData>::new();
    codec.register_method_callback(&imu, Recorder::record);

    let frame = build_frame(
        u8::from(Command::GetImuData),
        &vec![0u8; ImuData::WIRE_SIZE],
    );

    thread::scope(|scope| {
        for _ in 0..4 {
            let codec = Arc::clone(&codec);
            let frame = frame.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    codec.parse(&frame);
                }
            });
        }

        for _ in 0..2 {
            let codec = Arc::clone(&codec);
            scope.spawn(move || {
                let local = Recorder::<RcValues>::new();
                for _ in 0..200 {
                    codec.register_method_callback(&local, Recorder::record);
                    assert_eq!(
                        codec.release_method_callback(&local, Recorder::record),
                        1
                    );
                }
            });
        }
    });

    assert_eq!(imu.count(), 4 * 50);
}
