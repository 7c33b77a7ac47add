//! Lock-free monitor tap for the rendered waveform
//!
//! The audio callback pushes every sample it renders into an SPSC ring
//! buffer; the UI thread drains it each frame into a rolling snapshot for
//! the waveform strip. The audio thread is the single producer and the UI
//! thread the single consumer, so no lock is ever taken on the render path.
//! If the UI falls behind and the ring fills, samples are dropped, which is
//! acceptable for a purely visual tap.

use ringbuf::{
    traits::{Consumer, Producer, Split},
    HeapRb,
};
use std::sync::{Arc, Mutex};

/// Producer half, handed into the audio output callback.
pub struct MonitorProducer {
    producer: ringbuf::HeapProd<i16>,
}

impl MonitorProducer {
    /// Push one rendered sample. Lock-free; dropped if the ring is full.
    #[inline]
    pub fn push(&mut self, sample: i16) {
        let _ = self.producer.try_push(sample);
    }

    /// Push a rendered block into the ring.
    #[inline]
    pub fn push_slice(&mut self, samples: &[i16]) {
        for &sample in samples {
            if self.producer.try_push(sample).is_err() {
                break;
            }
        }
    }
}

/// Consumer half, owned by the UI thread.
pub struct MonitorConsumer {
    consumer: ringbuf::HeapCons<i16>,
    snapshot: Vec<i16>,
    capacity: usize,
    write_pos: usize,
}

impl MonitorConsumer {
    /// Drain newly rendered samples into the rolling snapshot.
    /// Call once per UI frame before reading.
    pub fn update(&mut self) {
        while let Some(sample) = self.consumer.try_pop() {
            self.snapshot[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % self.capacity;
        }
    }

    /// The snapshot in chronological order, oldest first.
    pub fn samples(&self) -> Vec<i16> {
        let mut out = Vec::with_capacity(self.capacity);
        for i in 0..self.capacity {
            out.push(self.snapshot[(self.write_pos + i) % self.capacity]);
        }
        out
    }
}

/// Shared monitor buffer; each half is taken once by its owning thread.
pub struct MonitorBuffer {
    producer: Arc<Mutex<Option<MonitorProducer>>>,
    consumer: Arc<Mutex<Option<MonitorConsumer>>>,
}

impl MonitorBuffer {
    pub fn new(capacity: usize) -> Self {
        // Extra headroom so a whole render block fits between UI frames.
        let rb = HeapRb::<i16>::new(capacity * 4);
        let (prod, cons) = rb.split();

        Self {
            producer: Arc::new(Mutex::new(Some(MonitorProducer { producer: prod }))),
            consumer: Arc::new(Mutex::new(Some(MonitorConsumer {
                consumer: cons,
                snapshot: vec![0; capacity],
                capacity,
                write_pos: 0,
            }))),
        }
    }

    /// Take the producer handle (the audio path calls this once at startup,
    /// never from the callback itself).
    pub fn take_producer(&self) -> Option<MonitorProducer> {
        self.producer.lock().unwrap().take()
    }

    /// Take the consumer handle (UI thread calls this once).
    pub fn take_consumer(&self) -> Option<MonitorConsumer> {
        self.consumer.lock().unwrap().take()
    }
}
