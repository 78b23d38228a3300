//! Microphone capture using Web Audio API
//!
//! `getUserMedia` stream -> `MediaStreamAudioSourceNode` -> `AnalyserNode`.
//! The analyser is read once per frame by the blow monitor.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AnalyserNode, AudioContext, MediaStream, MediaStreamAudioSourceNode, MediaStreamConstraints,
    MediaStreamTrack,
};

use crate::error::MicError;
use crate::scene::{FrequencySource, ReleaseGuard};

/// Best-effort message from a thrown JS value
fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", e.name(), e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// `name` property of a rejection (DOMException or Error), empty if absent
fn error_name(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_default()
}

fn rejection(err: JsValue) -> MicError {
    MicError::from_rejection(&error_name(&err), describe(&err))
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn close_context(ctx: &AudioContext) {
    if let Err(e) = ctx.close() {
        log::warn!("AudioContext close failed: {}", describe(&e));
    }
}

/// A live microphone feeding an analyser
pub struct Microphone {
    ctx: AudioContext,
    analyser: AnalyserNode,
    // Held so the graph stays connected
    _source: MediaStreamAudioSourceNode,
    stream: MediaStream,
    released: bool,
}

impl Microphone {
    /// Ask for microphone permission and build the analysis graph
    pub async fn acquire() -> Result<Self, MicError> {
        let window =
            web_sys::window().ok_or_else(|| MicError::Unavailable("no window".to_string()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| MicError::Unavailable(describe(&e)))?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(rejection)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(rejection)?
            .dyn_into()
            .map_err(|e| MicError::AudioGraph(describe(&e)))?;

        // From here on the stream is live; stop it if the graph fails
        let stream_guard = ReleaseGuard::new(|| stop_tracks(&stream));
        let graph = |e: JsValue| MicError::AudioGraph(describe(&e));
        let ctx = AudioContext::new().map_err(graph)?;
        let ctx_guard = ReleaseGuard::new(|| close_context(&ctx));
        let analyser = ctx.create_analyser().map_err(graph)?;
        let source = ctx.create_media_stream_source(&stream).map_err(graph)?;
        source.connect_with_audio_node(&analyser).map_err(graph)?;
        ctx_guard.disarm();
        stream_guard.disarm();

        log::info!("Microphone granted (fft size {})", analyser.fft_size());
        Ok(Self {
            ctx,
            analyser,
            _source: source,
            stream,
            released: false,
        })
    }
}

impl FrequencySource for Microphone {
    // The whole fftSize-long buffer is averaged even though only the first
    // half receives bins; the threshold of 20 is tuned for that.
    fn buffer_len(&self) -> usize {
        self.analyser.fft_size() as usize
    }

    fn read_frequencies(&mut self, buf: &mut [u8]) {
        // Browsers may suspend a context created outside a user gesture
        if self.ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
        self.analyser.get_byte_frequency_data(buf);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        stop_tracks(&self.stream);
        close_context(&self.ctx);
    }
}

impl Drop for Microphone {
    fn drop(&mut self) {
        self.release();
    }
}
