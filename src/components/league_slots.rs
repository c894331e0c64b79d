use crate::catalog;
use crate::model::{BoardAction, BoardState, LeagueSlot};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LeagueSlotsProps {
    pub board: UseReducerHandle<BoardState>,
}

fn slot_select(
    board: &UseReducerHandle<BoardState>,
    slot: LeagueSlot,
    label: &str,
    current: Option<&'static str>,
) -> Html {
    let onchange = {
        let board = board.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() {
                let value = sel.value();
                board.dispatch(BoardAction::SetLeagueSlot {
                    slot,
                    unit_id: (!value.is_empty()).then_some(value),
                });
            }
        })
    };
    let options = slot.allow_list().iter().filter_map(|id| {
        catalog::unit_by_id(id).map(|u| {
            html! {
                <option value={u.id} selected={current == Some(u.id)}>
                    { format!("{} ({}★)", u.name, u.cost) }
                </option>
            }
        })
    });
    html! {
        <label style="display:flex; flex-direction:column; gap:4px; font-size:11px; opacity:0.9; flex:1;">
            { label }
            <select
                {onchange}
                style="background:#0e1116; border:1px solid #30363d; border-radius:8px; padding:6px 8px; color:#e4e4e7; font-size:13px;"
            >
                <option value="" selected={current.is_none()}>{"— None —"}</option>
                { for options }
            </select>
        </label>
    }
}

/// The two Glory League picks. A selection only scores once its unit also
/// stands in the player zone.
#[function_component(LeagueSlots)]
pub fn league_slots(props: &LeagueSlotsProps) -> Html {
    html! {
        <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; gap:12px;">
            { slot_select(
                &props.board,
                LeagueSlot::Small,
                "Glory League · 1-gold pick",
                props.board.league_small.map(|u| u.id),
            ) }
            { slot_select(
                &props.board,
                LeagueSlot::Large,
                "Glory League · 5-gold pick",
                props.board.league_large.map(|u| u.id),
            ) }
        </div>
    }
}
