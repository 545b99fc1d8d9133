use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::detector::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::gesture::geometry::HAND_CONNECTIONS;
use crate::gesture::Landmark;

#[derive(Properties, PartialEq, Clone)]
pub struct WebcamPanelProps {
    pub video_ref: NodeRef,
    pub canvas_ref: NodeRef,
    pub active: bool,
}

#[function_component]
pub fn WebcamPanel(props: &WebcamPanelProps) -> Html {
    let frame_style = format!(
        "position:relative; width:{}px; height:{}px; border:1px solid #3d2a5c; border-radius:8px; overflow:hidden; background:#0d0818;",
        FRAME_WIDTH, FRAME_HEIGHT
    );
    // Both layers are mirrored so the preview behaves like a mirror.
    let layer_style = "position:absolute; inset:0; width:100%; height:100%; transform:scaleX(-1);";
    html! {<div style={frame_style}>
        <video ref={props.video_ref.clone()} autoplay=true playsinline=true muted=true style={layer_style}></video>
        <canvas ref={props.canvas_ref.clone()} width={FRAME_WIDTH.to_string()} height={FRAME_HEIGHT.to_string()} style={layer_style}></canvas>
        { if !props.active { html!{
            <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; font-size:12px; opacity:0.6;">{"Camera off"}</div>
        } } else { html!{} } }
    </div>}
}

fn context_2d(canvas_ref: &NodeRef) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, ctx))
}

/// Redraw the landmark overlay; `None` just clears it.
pub fn draw_hand(canvas_ref: &NodeRef, landmarks: Option<&[Landmark]>) {
    let Some((canvas, ctx)) = context_2d(canvas_ref) else {
        return;
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    let Some(points) = landmarks else {
        return;
    };

    ctx.set_stroke_style_str("#c9a227");
    ctx.set_line_width(2.0);
    for &(a, b) in HAND_CONNECTIONS.iter() {
        let (Some(p), Some(q)) = (points.get(a), points.get(b)) else {
            continue;
        };
        ctx.begin_path();
        ctx.move_to(p.x * w, p.y * h);
        ctx.line_to(q.x * w, q.y * h);
        ctx.stroke();
    }

    ctx.set_fill_style_str("#f0d878");
    for p in points {
        ctx.begin_path();
        ctx.arc(p.x * w, p.y * h, 3.0, 0.0, std::f64::consts::PI * 2.0)
            .ok();
        ctx.fill();
    }
}

pub fn clear_canvas(canvas_ref: &NodeRef) {
    draw_hand(canvas_ref, None);
}
