use yew::prelude::*;

use crate::cards::Card;
use crate::model::SlotLabel;

#[derive(Properties, PartialEq, Clone)]
pub struct SelectedSlotsProps {
    /// Committed cards in slot order.
    pub selections: Vec<Card>,
    pub on_open: Callback<Card>,
}

#[function_component]
pub fn SelectedSlots(props: &SelectedSlotsProps) -> Html {
    let slot_style = "width:96px; height:150px; border-radius:8px; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:6px;";
    html! {
        <div id="selected-cards" style="display:flex; gap:18px; justify-content:center;">
            { for SlotLabel::ALL.iter().enumerate().map(|(i, label)| {
                match props.selections.get(i) {
                    Some(card) => {
                        let on_open = props.on_open.clone();
                        let card_cb = card.clone();
                        let onclick = Callback::from(move |_| on_open.emit(card_cb.clone()));
                        html! {
                            <div style="display:flex; flex-direction:column; align-items:center; gap:6px; cursor:pointer;" {onclick}>
                                <div style={format!("{} border:1px solid #c9a227; background:linear-gradient(135deg, {} 0%, #1a0f2e 100%);", slot_style, card.color())}>
                                    <span style="font-size:13px; text-align:center; color:#fff;">{ card.name.clone() }<br/><small>{ card.name_en.clone() }</small></span>
                                </div>
                                <div style="font-size:12px; color:#c9a227;">{ label.label() }</div>
                            </div>
                        }
                    }
                    None => html! {
                        <div style="display:flex; flex-direction:column; align-items:center; gap:6px;">
                            <div style={format!("{} border:1px dashed #3d2a5c; background:rgba(45,27,78,0.4);", slot_style)}>
                                <span style="font-size:20px; opacity:0.6;">{ (i + 1).to_string() }</span>
                                <span style="font-size:12px; opacity:0.6;">{ label.label() }</span>
                            </div>
                            <div style="font-size:12px; opacity:0.4;">{ label.label() }</div>
                        </div>
                    },
                }
            }) }
        </div>
    }
}
