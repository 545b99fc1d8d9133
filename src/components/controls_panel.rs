use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub camera_label: &'static str,
    pub camera_active: bool,
    pub camera_busy: bool,
    pub on_toggle_camera: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let camera_cb = {
        let cb = props.on_toggle_camera.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let camera_style = if props.camera_active {
        "background:#c9a227; color:#1a0f2e; border:1px solid #f0d878;"
    } else {
        "background:#2d1b4e; color:#f0d878; border:1px solid #c9a227;"
    };
    html! {<div style="display:flex; flex-direction:column; gap:8px; background:rgba(26,15,46,0.9); border:1px solid #3d2a5c; border-radius:8px; padding:10px; min-width:220px;">
        <button onclick={camera_cb} disabled={props.camera_busy} style={format!("padding:6px 10px; border-radius:6px; cursor:pointer; {}", camera_style)}>
            <span>{"📷 "}</span>{ props.camera_label }
        </button>
        <button onclick={reset_cb} style="padding:6px 10px; border-radius:6px; cursor:pointer; background:#2d1b4e; color:#f0d878; border:1px solid #3d2a5c;">{"🔄 Reshuffle"}</button>
        <ul style="margin:4px 0 0 16px; padding:0; font-size:11px; line-height:1.5; opacity:0.8;">
            <li>{"✋ Open palm, sweep sideways: browse"}</li>
            <li>{"✊ Hold a fist: draw the highlighted card"}</li>
            <li>{"🖐️ Hold an open palm: read your latest card"}</li>
            <li>{"Keyboard: ← → browse, Enter/Space draw"}</li>
        </ul>
    </div>}
}
