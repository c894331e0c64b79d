use crate::model::{
    BoardAction, BoardState, PlacedUnit, Position, Zone, BOARD_COLS, BOARD_ROWS, ENEMY_ROW_END,
};
use crate::state::gesture::DragSource;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub board: UseReducerHandle<BoardState>,
    /// Cell currently under an active touch drag, for the hover mark.
    pub touch_over: Option<Position>,
    pub on_open_detail: Callback<Position>,
    pub on_touch_press: Callback<(DragSource, f64, f64)>,
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let cells = (0..BOARD_ROWS).flat_map(|row| {
        (0..BOARD_COLS).map(move |col| Position { row, col })
    });
    html! {
        <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px;">
            <div style="display:flex; justify-content:space-between; font-size:11px; opacity:0.7; margin-bottom:6px;">
                <span>{"Enemy preview (top rows)"}</span>
                <span>{"Your area (bottom rows)"}</span>
            </div>
            <div style="display:grid; grid-template-columns:repeat(7, 1fr); gap:5px;">
                { for cells.map(|pos| html! {
                    <Cell
                        key={pos.key()}
                        pos={pos}
                        placed={props.board.board.get(&pos).copied()}
                        touch_marked={props.touch_over == Some(pos)}
                        board={props.board.clone()}
                        on_open_detail={props.on_open_detail.clone()}
                        on_touch_press={props.on_touch_press.clone()}
                    />
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct CellProps {
    pub pos: Position,
    pub placed: Option<PlacedUnit>,
    pub touch_marked: bool,
    pub board: UseReducerHandle<BoardState>,
    pub on_open_detail: Callback<Position>,
    pub on_touch_press: Callback<(DragSource, f64, f64)>,
}

#[function_component(Cell)]
fn cell(props: &CellProps) -> Html {
    let drag_over = use_state(|| false);
    let pos = props.pos;
    let marked = *drag_over || props.touch_marked;

    let ondragover = {
        let drag_over = drag_over.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_over.set(true);
        })
    };
    let ondragleave = {
        let drag_over = drag_over.clone();
        Callback::from(move |_e: DragEvent| drag_over.set(false))
    };
    let ondrop = {
        let drag_over = drag_over.clone();
        let board = props.board.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_over.set(false);
            let Some(dt) = e.data_transfer() else {
                return;
            };
            let from = dt
                .get_data("fromPos")
                .ok()
                .filter(|s| !s.is_empty())
                .and_then(|s| Position::parse(&s));
            let unit_id = dt.get_data("unitId").ok().filter(|s| !s.is_empty());
            if let Some(from) = from {
                board.dispatch(BoardAction::Move { from, to: pos });
            } else if let Some(unit_id) = unit_id {
                board.dispatch(BoardAction::Place { unit_id, pos });
            }
        })
    };

    let zone_bg = match pos.zone() {
        Zone::Enemy => "#1a1420",
        Zone::Player => "#10241a",
    };
    let border = if marked {
        "2px solid #6366f1"
    } else if pos.row == ENEMY_ROW_END {
        "1px solid #445"
    } else {
        "1px solid #2f3641"
    };
    let cell_style = format!(
        "aspect-ratio:1; background:{zone_bg}; border:{border}; border-radius:8px; \
         display:flex; align-items:center; justify-content:center; position:relative;"
    );

    let token = props.placed.map(|placed| {
        let unit = placed.unit;
        let ondragstart = Callback::from(move |e: DragEvent| {
            if let Some(dt) = e.data_transfer() {
                let _ = dt.set_data("fromPos", &pos.key());
                let _ = dt.set_data("unitId", "");
            }
        });
        let onclick = {
            let cb = props.on_open_detail.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                cb.emit(pos);
            })
        };
        let oncontextmenu = {
            let board = props.board.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                board.dispatch(BoardAction::Remove { pos });
            })
        };
        let ontouchstart = {
            let cb = props.on_touch_press.clone();
            let img = unit.img.to_string();
            Callback::from(move |e: TouchEvent| {
                if let Some(t) = e.touches().item(0) {
                    cb.emit((
                        DragSource::Cell {
                            from: pos,
                            img: img.clone(),
                        },
                        t.client_x() as f64,
                        t.client_y() as f64,
                    ));
                }
            })
        };
        let glow = if placed.is_blessed {
            "box-shadow:0 0 0 3px #eab308, 0 10px 20px rgba(0,0,0,0.6); border-color:#eab308;"
        } else {
            ""
        };
        let enemy_tint = if placed.zone == Zone::Enemy {
            "filter:grayscale(0.4);"
        } else {
            ""
        };
        html! {
            <div
                draggable="true"
                title={unit.name}
                {ondragstart}
                {onclick}
                {oncontextmenu}
                {ontouchstart}
                style={format!(
                    "width:86%; height:86%; border-radius:50%; border:2px solid #30363d; \
                     background-image:url({}); background-size:cover; cursor:grab; {glow}{enemy_tint}",
                    unit.img
                )}
            ></div>
        }
    });

    html! {
        <div data-pos={pos.key()} style={cell_style} {ondragover} {ondragleave} {ondrop}>
            { token.unwrap_or_default() }
        </div>
    }
}
