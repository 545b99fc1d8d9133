mod cards;
mod components;
mod detector;
mod gesture;
mod input;
mod model;
mod state;
mod status;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
