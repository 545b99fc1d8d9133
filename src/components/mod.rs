pub mod app;
pub mod card_deck;
pub mod controls_panel;
pub mod meaning_modal;
pub mod selected_slots;
pub mod status_bar;
pub mod webcam_panel;
