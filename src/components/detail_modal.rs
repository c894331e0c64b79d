use crate::catalog;
use crate::model::{BoardAction, BoardState, Position};
use crate::util::{cost_color, cost_label};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DetailModalProps {
    pub pos: Position,
    pub board: UseReducerHandle<BoardState>,
    pub on_close: Callback<()>,
}

/// Detail view for a placed unit: traits, blessing toggles, recommended
/// items and removal. The modal owns none of the state; every button just
/// dispatches a board action.
#[function_component(DetailModal)]
pub fn detail_modal(props: &DetailModalProps) -> Html {
    let pos = props.pos;
    let Some(placed) = props.board.board.get(&pos).copied() else {
        return html! {};
    };
    let unit = placed.unit;
    let color = cost_color(unit.cost);

    let close_overlay = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let remove = {
        let board = props.board.clone();
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            board.dispatch(BoardAction::Remove { pos });
            cb.emit(());
        })
    };

    let blessing_buttons = unit.traits.iter().map(|trait_name| {
        let trait_name = *trait_name;
        let active = placed.is_blessed && placed.blessed_trait == Some(trait_name);
        let onclick = {
            let board = props.board.clone();
            Callback::from(move |_: MouseEvent| {
                board.dispatch(BoardAction::ToggleBlessing { pos, trait_name });
            })
        };
        let (bg, border, fg) = if active {
            ("rgba(234,179,8,0.15)", "#eab308", "#eab308")
        } else {
            ("rgba(255,255,255,0.04)", "rgba(255,255,255,0.1)", "#e4e4e7")
        };
        html! {
            <button
                {onclick}
                style={format!(
                    "width:100%; padding:9px 12px; cursor:pointer; background:{bg}; border:1px solid {border}; \
                     border-radius:10px; color:{fg}; font-size:12px; font-weight:700; display:flex; \
                     justify-content:space-between; align-items:center; text-align:left;"
                )}
            >
                <span>{ trait_name }</span>
                <span style="font-size:10px; opacity:0.8;">{ if active { "★ blessed" } else { "+1 pt" } }</span>
            </button>
        }
    });

    let equips = catalog::equip_recs(unit.traits).into_iter().enumerate().map(|(i, eq)| {
        let rank = ["Core", "2nd", "3rd"].get(i).copied().unwrap_or("Alt");
        html! {
            <div style="display:flex; align-items:center; gap:10px; padding:8px 10px; border-radius:10px; background:rgba(255,255,255,0.03); border:1px solid rgba(255,255,255,0.07);">
                <span style="font-size:18px;">{ eq.icon }</span>
                <div style="flex:1; min-width:0;">
                    <div style="font-size:12px; font-weight:700;">{ eq.name }</div>
                    <div style="font-size:10px; opacity:0.6;">{ eq.desc }</div>
                </div>
                <span style="font-size:9px; font-weight:800; opacity:0.7; text-transform:uppercase;">{ rank }</span>
            </div>
        }
    });

    html! {
        <div
            onclick={close_overlay.clone()}
            style="position:fixed; inset:0; background:rgba(0,0,0,0.85); z-index:9998; display:flex; align-items:center; justify-content:center; padding:16px;"
        >
            <div
                onclick={stop}
                style="background:#13171d; border:1px solid rgba(255,255,255,0.1); border-radius:18px; width:100%; max-width:380px; overflow:hidden;"
            >
                <div style={format!("display:flex; align-items:center; gap:14px; padding:18px; border-bottom:1px solid rgba(255,255,255,0.07); background:linear-gradient(135deg, {color}22 0%, transparent 60%);")}>
                    <img
                        src={unit.img}
                        alt={unit.name}
                        style={format!("width:56px; height:56px; border-radius:14px; object-fit:cover; border:2px solid {color};")}
                    />
                    <div style="flex:1; min-width:0;">
                        <div style="display:flex; align-items:center; gap:8px;">
                            <span style="font-size:17px; font-weight:800;">{ unit.name }</span>
                            { if placed.is_blessed {
                                html! { <span style="font-size:10px; color:#eab308; border:1px solid rgba(234,179,8,0.4); border-radius:10px; padding:1px 7px;">{"✦ BLESSED"}</span> }
                            } else {
                                html! {}
                            } }
                        </div>
                        <span style={format!("font-size:11px; color:{color}; font-weight:700;")}>{ cost_label(unit.cost) }</span>
                    </div>
                    <button
                        onclick={close_overlay}
                        style="background:rgba(255,255,255,0.06); border:1px solid rgba(255,255,255,0.08); width:30px; height:30px; border-radius:8px; color:#71717a; cursor:pointer;"
                    >{"✕"}</button>
                </div>
                <div style="padding:16px; display:flex; flex-direction:column; gap:14px; max-height:55vh; overflow-y:auto;">
                    <div>
                        <div style="font-size:9px; font-weight:800; opacity:0.5; text-transform:uppercase; letter-spacing:0.1em; margin-bottom:6px;">{"Traits"}</div>
                        <div style="display:flex; flex-wrap:wrap; gap:6px;">
                            { for unit.traits.iter().map(|t| html! {
                                <span style="padding:4px 10px; border-radius:14px; font-size:11px; background:rgba(99,102,241,0.1); border:1px solid rgba(99,102,241,0.25); color:#a5b4fc;">{ *t }</span>
                            }) }
                        </div>
                    </div>
                    <div>
                        <div style="font-size:9px; font-weight:800; opacity:0.5; text-transform:uppercase; letter-spacing:0.1em; margin-bottom:6px;">{"Blessing"}</div>
                        <div style="display:flex; flex-direction:column; gap:6px;">
                            { for blessing_buttons }
                        </div>
                    </div>
                    <div>
                        <div style="font-size:9px; font-weight:800; opacity:0.5; text-transform:uppercase; letter-spacing:0.1em; margin-bottom:6px;">{"Recommended items"}</div>
                        <div style="display:flex; flex-direction:column; gap:6px;">
                            { for equips }
                        </div>
                    </div>
                </div>
                <div style="padding:12px 16px; border-top:1px solid rgba(255,255,255,0.07);">
                    <button
                        onclick={remove}
                        style="width:100%; padding:9px; cursor:pointer; background:rgba(239,68,68,0.1); border:1px solid rgba(239,68,68,0.25); border-radius:10px; color:#f87171; font-size:12px; font-weight:700;"
                    >{"Remove from board"}</button>
                </div>
            </div>
        </div>
    }
}
