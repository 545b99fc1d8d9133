use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::model::DeckEntry;

#[derive(Properties, PartialEq, Clone)]
pub struct CardDeckProps {
    pub entries: Vec<DeckEntry>,
    pub highlighted: Option<usize>,
    /// Entry still flipping into its slot; rendered until it settles.
    pub transition: Option<usize>,
    /// Show the hand cursor above the highlighted card.
    pub indicator: bool,
    pub on_pick: Callback<usize>,
}

const CARD_BASE: &str = "flex:0 0 auto; width:84px; height:132px; border-radius:8px; display:flex; align-items:center; justify-content:center; cursor:pointer; transition:transform 0.25s, box-shadow 0.25s, opacity 0.5s; position:relative;";
const CARD_BACK: &str = "background:repeating-linear-gradient(45deg, #2d1b4e, #2d1b4e 6px, #3d2a5c 6px, #3d2a5c 12px); border:1px solid #c9a227;";

#[function_component]
pub fn CardDeck(props: &CardDeckProps) -> Html {
    let highlight_ref = use_node_ref();

    {
        let highlight_ref = highlight_ref.clone();
        use_effect_with(props.highlighted, move |_| {
            if let Some(el) = highlight_ref.cast::<Element>() {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Nearest);
                opts.set_inline(ScrollLogicalPosition::Center);
                el.scroll_into_view_with_scroll_into_view_options(&opts);
            }
            || ()
        });
    }

    let cards = props.entries.iter().enumerate().filter_map(|(i, entry)| {
        let flipping = props.transition == Some(i);
        if entry.is_selected && !flipping {
            return None;
        }
        let is_hl = props.highlighted == Some(i);
        let style = if flipping {
            format!(
                "{} background:linear-gradient(135deg, {} 0%, #1a0f2e 100%); border:1px solid #f0d878; transform:translateY(-30px) rotateY(180deg); opacity:0.4;",
                CARD_BASE,
                entry.card.color()
            )
        } else if is_hl {
            format!(
                "{} {} transform:translateY(-14px) scale(1.06); box-shadow:0 0 18px #f0d878;",
                CARD_BASE, CARD_BACK
            )
        } else {
            format!("{} {}", CARD_BASE, CARD_BACK)
        };
        let onclick = {
            let cb = props.on_pick.clone();
            Callback::from(move |_| cb.emit(i))
        };
        let node_ref = if is_hl { highlight_ref.clone() } else { NodeRef::default() };
        Some(html! {
            <div key={entry.card.id} ref={node_ref} {style} {onclick}>
                { if flipping {
                    html!{ <span style="font-size:11px; color:#fff; text-align:center;">{ entry.card.name_en.clone() }</span> }
                } else {
                    html!{ <span style="font-size:22px; opacity:0.5;">{"✦"}</span> }
                } }
                { if is_hl && props.indicator {
                    html!{ <span style="position:absolute; top:-26px; font-size:18px;">{"👆"}</span> }
                } else { html!{} } }
            </div>
        })
    });

    html! {<div id="card-deck" style="display:flex; gap:10px; overflow-x:auto; padding:40px 24px 16px; width:100%; box-sizing:border-box; perspective:800px;">
        { for cards }
    </div>}
}
