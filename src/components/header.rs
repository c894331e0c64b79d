use crate::model::PLAYER_CAP;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub unit_count: usize,
    pub total_cost: u32,
    pub on_clear: Callback<MouseEvent>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <div style="display:flex; align-items:center; justify-content:space-between; padding:12px 16px; background:#161b22; border-bottom:1px solid #30363d;">
            <span style="font-weight:700; font-size:16px;">{"Lineup Builder"}</span>
            <div style="display:flex; align-items:center; gap:14px; font-size:13px;">
                <span>{ format!("Units: {}/{}", props.unit_count, PLAYER_CAP) }</span>
                <span>{ format!("Gold: {}", props.total_cost) }</span>
                <button
                    onclick={props.on_clear.clone()}
                    style="background:rgba(239,68,68,0.1); border:1px solid rgba(239,68,68,0.3); border-radius:8px; color:#f87171; padding:5px 12px; cursor:pointer; font-size:12px;"
                >
                    {"Clear board (R)"}
                </button>
            </div>
        </div>
    }
}
