// Audio playback - cpal output stream draining the console's FIFO
//
// The emulation thread pushes i16 samples into the shared queue; the
// cpal callback drains them at the device rate, padding with silence
// when the queue runs dry. Both sides tolerate drops by design.

use crate::apu::SampleQueue;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, Stream, StreamConfig};
use std::sync::Arc;

/// Target output sample rate
const SAMPLE_RATE: u32 = 44_100;

/// Audio playback handle; the stream stops when this is dropped
pub struct AudioPlayback {
    _stream: Stream,
}

impl AudioPlayback {
    /// Open the default output device and start draining `queue`
    pub fn new(queue: Arc<SampleQueue>) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no audio output device available")?;

        let config = StreamConfig {
            channels: 1,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for out in data.iter_mut() {
                        *out = match queue.pop() {
                            Some(sample) => sample as f32 / i16::MAX as f32,
                            None => 0.0,
                        };
                    }
                },
                |err| log::warn!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("failed to start audio stream: {}", e))?;

        log::info!(
            "audio output started: {} Hz mono on {}",
            SAMPLE_RATE,
            device.name().unwrap_or_else(|_| "unknown device".into())
        );

        Ok(AudioPlayback { _stream: stream })
    }
}
