//! Bridge to the MediaPipe `Hands` and `Camera` globals loaded by `index.html`.
//!
//! [`DetectorSession::start`] opens the webcam, wires MediaPipe's frame loop
//! and hands every result to a Rust callback as plain [`Landmark`]s. Failures
//! come back as [`CameraError`] so the UI can report them and keep the
//! keyboard path alive.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Promise, Reflect};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::gesture::Landmark;
use crate::util::{clog, cwarn};

pub const FRAME_WIDTH: u32 = 320;
pub const FRAME_HEIGHT: u32 = 240;

const HANDS_CDN: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/hands@0.4.1646424915";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("This browser does not support camera access")]
    Unsupported,
    #[error("Hand tracking library failed to load, please refresh")]
    DetectorMissing,
    #[error("Camera utilities failed to load, please refresh")]
    CameraUtilsMissing,
    #[error("Please allow camera access")]
    PermissionDenied,
    #[error("No camera device found")]
    NotFound,
    #[error("The camera is in use by another application")]
    Busy,
    #[error("Camera failed to start ({0}), please check permissions")]
    Other(String),
}

impl CameraError {
    /// Map a `DOMException.name` from `getUserMedia` to a user-facing reason.
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => Self::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" => Self::NotFound,
            "NotReadableError" | "TrackStartError" => Self::Busy,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<JsValue> for CameraError {
    fn from(err: JsValue) -> Self {
        let name = Reflect::get(&err, &JsValue::from_str("name"))
            .ok()
            .and_then(|v| v.as_string());
        match name {
            Some(name) => Self::from_dom_name(&name),
            None => Self::Other(err.as_string().unwrap_or_else(|| format!("{:?}", err))),
        }
    }
}

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    type Hands;

    #[wasm_bindgen(constructor, catch)]
    fn new(config: &Object) -> Result<Hands, JsValue>;

    #[wasm_bindgen(method, js_name = setOptions)]
    fn set_options(this: &Hands, options: &Object);

    #[wasm_bindgen(method, js_name = onResults)]
    fn on_results(this: &Hands, callback: &Function);

    #[wasm_bindgen(method)]
    fn send(this: &Hands, inputs: &Object) -> Promise;

    #[wasm_bindgen(method)]
    fn close(this: &Hands) -> Promise;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Camera)]
    #[derive(Debug, Clone)]
    type CameraUtil;

    #[wasm_bindgen(constructor, js_class = "Camera", catch)]
    fn new(video: &HtmlVideoElement, options: &Object) -> Result<CameraUtil, JsValue>;

    #[wasm_bindgen(method)]
    fn start(this: &CameraUtil) -> Promise;

    #[wasm_bindgen(method)]
    fn stop(this: &CameraUtil) -> Promise;
}

fn js_object(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj)
}

fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

/// Fail fast with a specific reason before touching the camera.
fn ensure_available() -> Result<(), CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let navigator = JsValue::from(window.navigator());
    if !has_property(&navigator, "mediaDevices") {
        return Err(CameraError::Unsupported);
    }
    let devices = Reflect::get(&navigator, &JsValue::from_str("mediaDevices"))?;
    if !has_property(&devices, "getUserMedia") {
        return Err(CameraError::Unsupported);
    }
    let global = JsValue::from(js_sys::global());
    if !has_property(&global, "Hands") {
        return Err(CameraError::DetectorMissing);
    }
    if !has_property(&global, "Camera") {
        return Err(CameraError::CameraUtilsMissing);
    }
    Ok(())
}

fn landmark_from_js(point: &JsValue) -> Option<Landmark> {
    let num = |key: &str| {
        Reflect::get(point, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    };
    Some(Landmark {
        x: num("x")?,
        y: num("y")?,
        z: num("z").unwrap_or(0.0),
    })
}

/// First hand of a MediaPipe `results` object; `None` when no hand was seen.
/// Unreadable points are dropped, which leaves a short frame that the
/// classifier rejects.
pub fn first_hand(results: &JsValue) -> Option<Vec<Landmark>> {
    let hands: Array = Reflect::get(results, &JsValue::from_str("multiHandLandmarks"))
        .ok()?
        .dyn_into()
        .ok()?;
    let points: Array = hands.get(0).dyn_into().ok()?;
    Some(points.iter().filter_map(|p| landmark_from_js(&p)).collect())
}

fn release_stream(video: &HtmlVideoElement) {
    if let Some(stream) = video.src_object() {
        for track in stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
    video.set_src_object(None);
}

async fn open_stream(video: &HtmlVideoElement) -> Result<(), CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let devices = window.navigator().media_devices()?;
    let constraints = MediaStreamConstraints::new();
    let video_opts = js_object(&[
        ("width", JsValue::from(FRAME_WIDTH)),
        ("height", JsValue::from(FRAME_HEIGHT)),
        ("facingMode", JsValue::from_str("user")),
    ])?;
    constraints.set_video(&JsValue::from(video_opts));
    let stream: MediaStream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
        .await?
        .dyn_into()?;
    video.set_src_object(Some(&stream));
    JsFuture::from(video.play()?).await?;
    Ok(())
}

/// Forwards detector frames to the UI until the session closes it.
struct FrameGate<F> {
    open: Rc<Cell<bool>>,
    on_hand: F,
}

impl<F: FnMut(Option<Vec<Landmark>>)> FrameGate<F> {
    fn new(on_hand: F) -> Self {
        Self {
            open: Rc::new(Cell::new(true)),
            on_hand,
        }
    }

    fn switch(&self) -> Rc<Cell<bool>> {
        self.open.clone()
    }

    fn deliver(&mut self, hand: Option<Vec<Landmark>>) {
        if self.open.get() {
            (self.on_hand)(hand);
        }
    }
}

pub struct DetectorSession {
    hands: Hands,
    open: Rc<Cell<bool>>,
    camera: CameraUtil,
    video: HtmlVideoElement,
    _locate_file: Closure<dyn Fn(String) -> String>,
    _on_results: Closure<dyn FnMut(JsValue)>,
    _on_frame: Closure<dyn FnMut() -> Promise>,
}

impl DetectorSession {
    /// Open the webcam into `video` and start hand tracking. `on_hand` runs
    /// once per processed frame, on the browser's event loop.
    pub async fn start<F>(video: HtmlVideoElement, on_hand: F) -> Result<Self, CameraError>
    where
        F: FnMut(Option<Vec<Landmark>>) + 'static,
    {
        ensure_available()?;
        if let Err(err) = open_stream(&video).await {
            release_stream(&video);
            return Err(err);
        }
        match Self::attach(video.clone(), on_hand).await {
            Ok(session) => {
                clog("camera started");
                Ok(session)
            }
            Err(err) => {
                release_stream(&video);
                Err(err)
            }
        }
    }

    async fn attach<F>(video: HtmlVideoElement, on_hand: F) -> Result<Self, CameraError>
    where
        F: FnMut(Option<Vec<Landmark>>) + 'static,
    {
        let locate_file = Closure::wrap(
            Box::new(|file: String| format!("{}/{}", HANDS_CDN, file))
                as Box<dyn Fn(String) -> String>,
        );
        let hands = Hands::new(&js_object(&[(
            "locateFile",
            locate_file.as_ref().clone(),
        )])?)?;
        hands.set_options(&js_object(&[
            ("maxNumHands", JsValue::from(1_u32)),
            ("modelComplexity", JsValue::from(1_u32)),
            ("minDetectionConfidence", JsValue::from(0.7_f64)),
            ("minTrackingConfidence", JsValue::from(0.5_f64)),
        ])?);

        let mut gate = FrameGate::new(on_hand);
        let open = gate.switch();
        let on_results = Closure::wrap(Box::new(move |results: JsValue| {
            gate.deliver(first_hand(&results));
        }) as Box<dyn FnMut(JsValue)>);
        hands.on_results(on_results.as_ref().unchecked_ref());

        let on_frame = {
            let hands = hands.clone();
            let video = video.clone();
            Closure::wrap(Box::new(move || {
                match js_object(&[("image", JsValue::from(video.clone()))]) {
                    Ok(inputs) => hands.send(&inputs),
                    Err(err) => Promise::reject(&err),
                }
            }) as Box<dyn FnMut() -> Promise>)
        };
        let camera = CameraUtil::new(
            &video,
            &js_object(&[
                ("onFrame", on_frame.as_ref().clone()),
                ("width", JsValue::from(FRAME_WIDTH)),
                ("height", JsValue::from(FRAME_HEIGHT)),
            ])?,
        )?;
        if let Err(err) = JsFuture::from(camera.start()).await {
            cwarn("camera utility failed to start");
            let _ = hands.close();
            return Err(err.into());
        }

        Ok(Self {
            hands,
            open,
            camera,
            video,
            _locate_file: locate_file,
            _on_results: on_results,
            _on_frame: on_frame,
        })
    }

    /// Stop capture at once. The JS callbacks stay alive until `Hands.close()`
    /// settles, since a frame already sent may still report back.
    pub fn stop(self) {
        self.open.set(false);
        let _ = self.camera.stop();
        release_stream(&self.video);
        let closing = self.hands.close();
        wasm_bindgen_futures::spawn_local(async move {
            if JsFuture::from(closing).await.is_err() {
                cwarn("hand detector did not close cleanly");
            }
            drop(self);
            clog("camera stopped");
        });
    }
}
