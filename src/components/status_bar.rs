use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub icon: &'static str,
    pub text: String,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    html! {<div id="gesture-status" style="display:flex; align-items:center; justify-content:center; gap:10px; padding:8px 16px; background:rgba(26,15,46,0.85); border:1px solid #c9a227; border-radius:20px; min-width:260px;">
        <span style="font-size:22px;">{ props.icon }</span>
        <span style="font-size:14px; color:#f0d878;">{ props.text.clone() }</span>
    </div>}
}
