use web_sys::MouseEvent;
use yew::prelude::*;

use crate::cards::Card;

#[derive(Properties, PartialEq, Clone)]
pub struct MeaningModalProps {
    pub card: Option<Card>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn MeaningModal(props: &MeaningModalProps) -> Html {
    let Some(card) = &props.card else {
        return html! {};
    };

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Clicks on the backdrop close; clicks inside the panel do not.
    let backdrop_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let stop_cb = Callback::from(|e: MouseEvent| e.stop_propagation());

    let row_style = "margin:6px 0; line-height:1.5;";
    let key_style = "color:#c9a227; font-weight:600;";

    html! {<div onclick={backdrop_cb} style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.65); z-index:50;">
        <div onclick={stop_cb} style="background:#1a0f2e; border:1px solid #c9a227; border-radius:12px; padding:18px 22px; width:90%; max-width:460px; display:flex; flex-direction:column; gap:12px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px; color:#f0d878;">{ card.title() }</h3>
                <button onclick={close_cb} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style={format!("height:120px; border-radius:8px; background:linear-gradient(135deg, {} 0%, #1a0f2e 100%);", card.color())}></div>
            <div style="font-size:14px;">
                <p style={row_style}><span style={key_style}>{"Keywords: "}</span>{ card.keywords.join(", ") }</p>
                <p style={row_style}><span style={key_style}>{"Upright: "}</span>{ card.upright.clone() }</p>
                <p style={row_style}><span style={key_style}>{"Reversed: "}</span>{ card.reversed.clone() }</p>
            </div>
        </div>
    </div>}
}
