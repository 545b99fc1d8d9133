use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlVideoElement, KeyboardEvent, Window};
use yew::prelude::*;

use super::{
    card_deck::CardDeck,
    controls_panel::ControlsPanel,
    meaning_modal::MeaningModal,
    selected_slots::SelectedSlots,
    status_bar::StatusBar,
    webcam_panel::{clear_canvas, draw_hand, WebcamPanel},
};
use crate::cards::{load_cards, Card};
use crate::detector::DetectorSession;
use crate::gesture::{
    GestureEvent, GestureState, HandFrame, Landmark, SelectionContext, MAX_SELECTIONS,
};
use crate::input::NavEvent;
use crate::model::{ConfirmOutcome, Deck, DeckAction, SessionPhase};
use crate::state::CameraPhase;
use crate::status::StatusLine;
use crate::util::{cerror, clog, now_ms};

/// Length of the flip animation after a commit.
const SETTLE_MS: i32 = 500;

type PendingTimer = (Window, i32, Closure<dyn FnMut()>);

fn schedule_settle(deck: UseReducerHandle<Deck>) -> Option<PendingTimer> {
    let window = web_sys::window()?;
    let cb = Closure::wrap(
        Box::new(move || deck.dispatch(DeckAction::SettleTransition)) as Box<dyn FnMut()>
    );
    let id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), SETTLE_MS)
        .ok()?;
    Some((window, id, cb))
}

#[function_component(App)]
pub fn app() -> Html {
    let deck = use_reducer(|| {
        let cards = load_cards().unwrap_or_else(|err| {
            cerror(&format!("card dataset failed to parse: {}", err));
            Vec::new()
        });
        Deck::shuffled(cards, MAX_SELECTIONS, &mut js_sys::Math::random)
    });
    // Long-lived JS callbacks read the deck through this, never a stale capture.
    let deck_ref = use_mut_ref(|| deck.clone());
    let gesture = use_mut_ref(GestureState::default);
    let session: Rc<RefCell<Option<DetectorSession>>> = use_mut_ref(|| None);
    let camera_phase = use_state(CameraPhase::default);
    let status = use_state_eq(StatusLine::idle);
    let meaning = use_state(|| None::<Card>);
    let video_ref = use_node_ref();
    let canvas_ref = use_node_ref();

    {
        let deck_ref = deck_ref.clone();
        let current = deck.clone();
        use_effect_with((*deck).clone(), move |_| {
            *deck_ref.borrow_mut() = current;
            || ()
        });
    }

    // Report each commit attempt
    {
        let deck = deck.clone();
        let status = status.clone();
        let deps = (deck.selections.len(), deck.last_confirm.clone());
        use_effect_with(deps, move |_| {
            if let Some(ConfirmOutcome::Selected { slot, card }) = &deck.last_confirm {
                clog(&format!("selected {} as {}", card.name_en, slot.label()));
            }
            if let Some(line) = StatusLine::for_confirm(&deck) {
                status.set(line);
            }
            || ()
        });
    }

    // Settle the flip animation
    {
        let deck_for_timer = deck.clone();
        use_effect_with(deck.transition, move |transition| {
            let pending = if transition.is_some() {
                schedule_settle(deck_for_timer)
            } else {
                None
            };
            move || {
                if let Some((window, id, _cb)) = pending {
                    window.clear_timeout_with_handle(id);
                }
            }
        });
    }

    // Keyboard navigation
    {
        let deck_ref = deck_ref.clone();
        let meaning = meaning.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let key = e.key();
                if key == "Escape" {
                    meaning.set(None);
                    return;
                }
                if let Some(nav) = NavEvent::from_key(&key) {
                    e.prevent_default();
                    let handle = deck_ref.borrow().clone();
                    handle.dispatch(nav.action());
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(w) = &window {
                w.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(w) = window {
                    let _ = w.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(keydown_cb);
            }
        });
    }

    // Release the webcam on unmount
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(s) = session.borrow_mut().take() {
                    s.stop();
                }
            }
        });
    }

    let toggle_camera = {
        let session = session.clone();
        let camera_phase = camera_phase.clone();
        let status = status.clone();
        let gesture = gesture.clone();
        let deck_ref = deck_ref.clone();
        let meaning = meaning.clone();
        let video_ref = video_ref.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |_| {
            if camera_phase.is_busy() {
                return;
            }
            if camera_phase.is_active() {
                if let Some(s) = session.borrow_mut().take() {
                    s.stop();
                }
                *gesture.borrow_mut() = GestureState::default();
                clear_canvas(&canvas_ref);
                camera_phase.set(CameraPhase::Off);
                status.set(StatusLine::for_camera(&CameraPhase::Off));
                return;
            }
            let Some(video) = video_ref.cast::<HtmlVideoElement>() else {
                cerror("video element not mounted");
                return;
            };
            camera_phase.set(CameraPhase::Starting);
            status.set(StatusLine::for_camera(&CameraPhase::Starting));

            let on_hand = {
                let canvas_ref = canvas_ref.clone();
                let gesture = gesture.clone();
                let deck_ref = deck_ref.clone();
                let status = status.clone();
                let meaning = meaning.clone();
                move |landmarks: Option<Vec<Landmark>>| {
                    draw_hand(&canvas_ref, landmarks.as_deref());
                    let frame = landmarks.as_deref().and_then(HandFrame::from_landmarks);
                    let handle = deck_ref.borrow().clone();
                    let ctx = SelectionContext {
                        selected: &handle.selections,
                        has_available: handle.has_available(),
                    };
                    let outcome = gesture.borrow_mut().update(frame, now_ms(), ctx);
                    status.set(outcome.status.into());
                    match outcome.event {
                        Some(GestureEvent::ShowMeaning(card)) => meaning.set(Some(card)),
                        Some(event) => {
                            if let Some(nav) = NavEvent::from_gesture(&event) {
                                handle.dispatch(nav.action());
                            }
                        }
                        None => {}
                    }
                }
            };

            let session = session.clone();
            let camera_phase = camera_phase.clone();
            let status = status.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match DetectorSession::start(video, on_hand).await {
                    Ok(s) => {
                        *session.borrow_mut() = Some(s);
                        camera_phase.set(CameraPhase::Active);
                        status.set(StatusLine::for_camera(&CameraPhase::Active));
                    }
                    Err(err) => {
                        cerror(&format!("camera failed: {}", err));
                        let failed = CameraPhase::Failed(err);
                        status.set(StatusLine::for_camera(&failed));
                        camera_phase.set(failed);
                    }
                }
            });
        })
    };

    let on_reset = {
        let session = session.clone();
        let camera_phase = camera_phase.clone();
        let status = status.clone();
        let gesture = gesture.clone();
        let meaning = meaning.clone();
        let deck = deck.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |_| {
            if let Some(s) = session.borrow_mut().take() {
                s.stop();
                camera_phase.set(CameraPhase::Off);
            }
            clear_canvas(&canvas_ref);
            *gesture.borrow_mut() = GestureState::default();
            meaning.set(None);
            deck.dispatch(DeckAction::Reset);
            status.set(StatusLine::reset());
            clog("deck reshuffled");
        })
    };

    let on_pick = {
        let deck = deck.clone();
        let camera_active = camera_phase.is_active();
        Callback::from(move |idx: usize| {
            if !camera_active {
                deck.dispatch(DeckAction::Highlight(idx));
            }
        })
    };

    let on_open_slot = {
        let meaning = meaning.clone();
        Callback::from(move |card: Card| meaning.set(Some(card)))
    };

    let on_close_meaning = {
        let meaning = meaning.clone();
        Callback::from(move |_| meaning.set(None))
    };

    let complete = deck.phase() == SessionPhase::Complete;

    html! {
        <div style="min-height:100vh; display:flex; flex-direction:column; align-items:center; gap:16px; padding:16px; box-sizing:border-box; background:radial-gradient(circle at top, #2d1b4e 0%, #0d0818 70%); color:#e8dcc0; font-family:system-ui, sans-serif;">
            <div id="top-bar" style="display:flex; flex-direction:column; align-items:center; gap:8px;">
                <h1 style="margin:0; font-size:26px; letter-spacing:2px; color:#f0d878;">{"Tarot Flow"}</h1>
                <StatusBar icon={status.icon} text={status.text.clone()} />
            </div>
            if !complete {
                <CardDeck
                    entries={deck.entries.clone()}
                    highlighted={deck.highlighted}
                    transition={deck.transition}
                    indicator={camera_phase.is_active()}
                    on_pick={on_pick}
                />
            }
            <SelectedSlots selections={deck.selections.clone()} on_open={on_open_slot} />
            <div style="display:flex; gap:16px; flex-wrap:wrap; justify-content:center; align-items:flex-start;">
                <WebcamPanel video_ref={video_ref.clone()} canvas_ref={canvas_ref.clone()} active={camera_phase.is_active()} />
                <ControlsPanel
                    camera_label={camera_phase.button_label()}
                    camera_active={camera_phase.is_active()}
                    camera_busy={camera_phase.is_busy()}
                    on_toggle_camera={toggle_camera}
                    on_reset={on_reset}
                />
            </div>
            <MeaningModal card={(*meaning).clone()} on_close={on_close_meaning} />
        </div>
    }
}
