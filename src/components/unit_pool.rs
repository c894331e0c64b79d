use crate::catalog;
use crate::model::{BoardAction, BoardState};
use crate::state::gesture::DragSource;
use crate::state::{CostFilter, PoolFilters};
use crate::util::cost_color;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct UnitPoolProps {
    pub board: UseReducerHandle<BoardState>,
    pub filters: UseStateHandle<PoolFilters>,
    pub on_touch_press: Callback<(DragSource, f64, f64)>,
}

const COST_CHIPS: [(CostFilter, &str); 6] = [
    (CostFilter::All, "All"),
    (CostFilter::Cost(1), "1★"),
    (CostFilter::Cost(2), "2★"),
    (CostFilter::Cost(3), "3★"),
    (CostFilter::Cost(4), "4★"),
    (CostFilter::Cost(5), "5★"),
];

#[function_component(UnitPool)]
pub fn unit_pool(props: &UnitPoolProps) -> Html {
    let filters = props.filters.clone();

    let oninput = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                filters.set(filters.with_search(&input.value()));
            }
        })
    };

    let chips = COST_CHIPS.iter().map(|(chip, label)| {
        let active = filters.cost == *chip;
        let onclick = {
            let filters = filters.clone();
            let chip = *chip;
            Callback::from(move |_: MouseEvent| filters.set(filters.with_cost(chip)))
        };
        let style = if active {
            "background:#6366f1; color:#fff; border:1px solid #6366f1;"
        } else {
            "background:transparent; color:#a1a1aa; border:1px solid #30363d;"
        };
        html! {
            <button {onclick} style={format!("{style} border-radius:16px; padding:3px 10px; font-size:11px; cursor:pointer;")}>
                { *label }
            </button>
        }
    });

    let visible: Vec<&'static catalog::Unit> =
        catalog::UNITS.iter().filter(|u| filters.matches(u)).collect();

    let cards = visible.iter().map(|unit| {
        let unit = *unit;
        let selected = props.board.unit_on_board(unit.id);
        let ondragstart = {
            let id = unit.id;
            Callback::from(move |e: DragEvent| {
                if let Some(dt) = e.data_transfer() {
                    let _ = dt.set_data("unitId", id);
                    let _ = dt.set_data("fromPos", "");
                }
            })
        };
        let onclick = {
            let board = props.board.clone();
            let id = unit.id.to_string();
            Callback::from(move |_: MouseEvent| {
                board.dispatch(BoardAction::AutoPlace {
                    unit_id: id.clone(),
                });
            })
        };
        let ontouchstart = {
            let cb = props.on_touch_press.clone();
            let id = unit.id.to_string();
            let img = unit.img.to_string();
            Callback::from(move |e: TouchEvent| {
                if let Some(t) = e.touches().item(0) {
                    cb.emit((
                        DragSource::Pool {
                            unit_id: id.clone(),
                            img: img.clone(),
                        },
                        t.client_x() as f64,
                        t.client_y() as f64,
                    ));
                }
            })
        };
        let dim = if selected {
            "opacity:0.45; cursor:not-allowed;"
        } else {
            "cursor:grab;"
        };
        let title = if selected {
            format!("{} (already on the board)", unit.name)
        } else {
            format!("{} · {}", unit.name, unit.traits.join(" / "))
        };
        html! {
            <div
                key={unit.id}
                draggable={(!selected).to_string()}
                {title}
                ondragstart={if selected { Callback::noop() } else { ondragstart }}
                onclick={if selected { Callback::noop() } else { onclick }}
                ontouchstart={if selected { Callback::noop() } else { ontouchstart }}
                style={format!(
                    "background:#1c2128; border:1px solid #30363d; border-radius:10px; padding:6px; \
                     display:flex; flex-direction:column; align-items:center; gap:4px; {dim}"
                )}
            >
                <div style="position:relative; width:52px; height:52px;">
                    <img
                        src={unit.img}
                        alt={unit.name}
                        loading="lazy"
                        style="width:100%; height:100%; border-radius:10px; object-fit:cover; background:#0e1116;"
                    />
                    <span style={format!(
                        "position:absolute; bottom:-4px; right:-4px; background:{}; color:#fff; \
                         border-radius:8px; font-size:10px; font-weight:700; padding:1px 5px;",
                        cost_color(unit.cost)
                    )}>{ unit.cost }</span>
                </div>
                <span style="font-size:11px; max-width:64px; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">
                    { unit.name }
                </span>
            </div>
        }
    });

    html! {
        <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; flex-direction:column; gap:10px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <span style="font-weight:600;">{"Units"}</span>
                <span style="font-size:11px; opacity:0.7;">{ format!("{} units", visible.len()) }</span>
            </div>
            <input
                type="text"
                placeholder="Search by name or trait..."
                {oninput}
                style="background:#0e1116; border:1px solid #30363d; border-radius:8px; padding:7px 10px; color:#e4e4e7; font-size:13px; outline:none;"
            />
            <div style="display:flex; gap:6px; flex-wrap:wrap;">
                { for chips }
            </div>
            <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(76px, 1fr)); gap:8px; max-height:60vh; overflow-y:auto;">
                { for cards }
            </div>
        </div>
    }
}
