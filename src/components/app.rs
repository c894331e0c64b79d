use super::board::BoardView;
use super::detail_modal::DetailModal;
use super::header::Header;
use super::league_slots::LeagueSlots;
use super::synergy_panel::SynergyPanel;
use super::toast::Toast;
use super::unit_pool::UnitPool;
use crate::codec;
use crate::model::{BoardAction, BoardState, Position, RestoreSource};
use crate::state::gesture::{DragSource, MoveOutcome, ReleaseOutcome, TouchGesture};
use crate::state::PoolFilters;
use crate::storage;
use crate::synergy;
use crate::util::clog;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// The floating element that follows the finger during a synthetic touch
/// drag, plus the cell currently underneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    pub x: f64,
    pub y: f64,
    pub img: String,
    pub over: Option<Position>,
}

/// Pending hold timer for the touch gesture. The closure must stay alive
/// until the timeout fires or is cleared.
#[derive(Default)]
struct HoldTimer {
    id: Option<i32>,
    closure: Option<Closure<dyn FnMut()>>,
}

impl HoldTimer {
    fn clear(&mut self) {
        if let (Some(id), Some(window)) = (self.id.take(), web_sys::window()) {
            window.clear_timeout_with_handle(id);
        }
        self.closure = None;
    }
}

/// Board cell under a viewport point, resolved through the DOM so the touch
/// path and the native drop path agree on targets.
fn cell_at_point(x: f64, y: f64) -> Option<Position> {
    let document = web_sys::window()?.document()?;
    let el = document.element_from_point(x as f32, y as f32)?;
    let cell = el.closest("[data-pos]").ok()??;
    Position::parse(&cell.get_attribute("data-pos")?)
}

#[function_component(App)]
pub fn app() -> Html {
    let board = use_reducer(BoardState::default);
    let filters = use_state(PoolFilters::default);
    let detail: UseStateHandle<Option<Position>> = use_state(|| None);
    let ghost: UseStateHandle<Option<Ghost>> = use_state(|| None);
    let gesture = use_mut_ref(TouchGesture::default);
    let hold_timer = use_mut_ref(HoldTimer::default);

    // Initial load: the URL wins when it carries a composition, otherwise
    // fall back to the autosaved draft. A corrupt draft is discarded.
    {
        let board = board.clone();
        use_effect_with((), move |_| {
            let parts = storage::read_query();
            if parts.comp.is_some() {
                board.dispatch(BoardAction::Restore {
                    decoded: codec::decode_query(&parts),
                    source: RestoreSource::Link,
                });
            } else if let Some(json) = storage::read_snapshot() {
                match codec::decode_snapshot_json(&json) {
                    Ok(decoded) => board.dispatch(BoardAction::Restore {
                        decoded,
                        source: RestoreSource::Draft,
                    }),
                    Err(err) => {
                        clog(&format!("discarding corrupt lineup autosave: {err}"));
                        storage::clear_snapshot();
                    }
                }
            }
            || ()
        });
    }

    // Mirror every board change into the URL and the autosave.
    {
        use_effect_with((*board).clone(), move |state| {
            storage::write_query(state);
            storage::write_snapshot(state);
            || ()
        });
    }

    // Keyboard shortcuts: 1-5 filter by cost, 0/` shows all, R resets.
    // Re-registered whenever the filter state changes so the handler never
    // reads a stale snapshot.
    {
        let board = board.clone();
        use_effect_with(filters.clone(), move |filters| {
            let filters = filters.clone();
            let window = web_sys::window();
            let key_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let typing = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.active_element())
                    .is_some_and(|el| {
                        matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
                    });
                if typing || e.ctrl_key() || e.meta_key() || e.alt_key() {
                    return;
                }
                match e.key().as_str() {
                    k @ ("1" | "2" | "3" | "4" | "5") => {
                        e.prevent_default();
                        if let Ok(cost) = k.parse::<u8>() {
                            filters.set(
                                filters.with_cost(crate::state::CostFilter::Cost(cost)),
                            );
                        }
                    }
                    "0" | "`" => {
                        e.prevent_default();
                        filters.set(filters.with_cost(crate::state::CostFilter::All));
                    }
                    "r" | "R" => {
                        e.prevent_default();
                        board.dispatch(BoardAction::Clear);
                    }
                    _ => {}
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        key_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(key_cb);
            }
        });
    }

    // A finger press on a token or pool card arms the hold timer; the drag
    // only starts if the hold elapses before release or scroll.
    let on_touch_press = {
        let gesture = gesture.clone();
        let ghost = ghost.clone();
        let hold_timer = hold_timer.clone();
        Callback::from(move |(source, x, y): (DragSource, f64, f64)| {
            let delay = source.hold_delay_ms();
            let img = match &source {
                DragSource::Pool { img, .. } | DragSource::Cell { img, .. } => img.clone(),
            };
            let token = gesture.borrow_mut().press(source, x, y);
            let Some(window) = web_sys::window() else {
                return;
            };
            let mut timer = hold_timer.borrow_mut();
            timer.clear();
            let cb = {
                let gesture = gesture.clone();
                let ghost = ghost.clone();
                Closure::wrap(Box::new(move || {
                    if gesture.borrow_mut().hold_elapsed(token) {
                        ghost.set(Some(Ghost {
                            x,
                            y,
                            img: img.clone(),
                            over: None,
                        }));
                    }
                }) as Box<dyn FnMut()>)
            };
            if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay as i32,
            ) {
                timer.id = Some(id);
            }
            timer.closure = Some(cb);
        })
    };

    let on_touch_move = {
        let gesture = gesture.clone();
        let ghost = ghost.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(t) = e.touches().item(0) else {
                return;
            };
            let (x, y) = (t.client_x() as f64, t.client_y() as f64);
            match gesture.borrow_mut().moved(x, y) {
                MoveOutcome::Dragging { x, y } => {
                    e.prevent_default();
                    let over = cell_at_point(x, y);
                    if let Some(g) = &*ghost {
                        ghost.set(Some(Ghost {
                            x,
                            y,
                            over,
                            img: g.img.clone(),
                        }));
                    }
                }
                MoveOutcome::Scrolled | MoveOutcome::Ignored => {}
            }
        })
    };

    let on_touch_end = {
        let gesture = gesture.clone();
        let ghost = ghost.clone();
        let hold_timer = hold_timer.clone();
        let board = board.clone();
        let detail = detail.clone();
        Callback::from(move |e: TouchEvent| {
            hold_timer.borrow_mut().clear();
            match gesture.borrow_mut().release() {
                ReleaseOutcome::None => {}
                ReleaseOutcome::Tap(source) => {
                    // Suppress the synthetic click that would repeat the action.
                    e.prevent_default();
                    match source {
                        DragSource::Cell { from, .. } => detail.set(Some(from)),
                        DragSource::Pool { unit_id, .. } => {
                            board.dispatch(BoardAction::AutoPlace { unit_id });
                        }
                    }
                }
                ReleaseOutcome::Drop(source) => {
                    e.prevent_default();
                    let target = e
                        .changed_touches()
                        .item(0)
                        .and_then(|t| cell_at_point(t.client_x() as f64, t.client_y() as f64));
                    if let Some(to) = target {
                        match source {
                            DragSource::Cell { from, .. } => {
                                board.dispatch(BoardAction::Move { from, to });
                            }
                            DragSource::Pool { unit_id, .. } => {
                                board.dispatch(BoardAction::Place { unit_id, pos: to });
                            }
                        }
                    }
                }
            }
            ghost.set(None);
        })
    };

    let on_touch_cancel = {
        let gesture = gesture.clone();
        let ghost = ghost.clone();
        let hold_timer = hold_timer.clone();
        Callback::from(move |_e: TouchEvent| {
            hold_timer.borrow_mut().clear();
            gesture.borrow_mut().cancel();
            ghost.set(None);
        })
    };

    let on_open_detail = {
        let detail = detail.clone();
        Callback::from(move |pos: Position| detail.set(Some(pos)))
    };
    let on_close_detail = {
        let detail = detail.clone();
        Callback::from(move |_| detail.set(None))
    };
    let on_clear = {
        let board = board.clone();
        Callback::from(move |_| board.dispatch(BoardAction::Clear))
    };

    let report = synergy::evaluate(&board);
    let snapshot = synergy::lineup_snapshot(&board);
    let touch_over = ghost.as_ref().and_then(|g| g.over);

    html! {
        <div
            style="min-height:100vh; background:#0e1116; color:#e4e4e7; font-family:sans-serif;"
            ontouchmove={on_touch_move}
            ontouchend={on_touch_end}
            ontouchcancel={on_touch_cancel}
        >
            <Header
                unit_count={report.unit_count}
                total_cost={report.total_cost}
                on_clear={on_clear}
            />
            <div style="display:flex; gap:16px; padding:16px; flex-wrap:wrap; align-items:flex-start;">
                <div style="flex:2; min-width:460px; display:flex; flex-direction:column; gap:16px;">
                    <BoardView
                        board={board.clone()}
                        touch_over={touch_over}
                        on_open_detail={on_open_detail}
                        on_touch_press={on_touch_press.clone()}
                    />
                    <LeagueSlots board={board.clone()} />
                    <SynergyPanel report={report.clone()} snapshot={snapshot} />
                </div>
                <div style="flex:1; min-width:300px;">
                    <UnitPool
                        board={board.clone()}
                        filters={filters.clone()}
                        on_touch_press={on_touch_press.clone()}
                    />
                </div>
            </div>
            <Toast message={board.feedback.clone()} seq={board.feedback_seq} />
            { if let Some(pos) = *detail {
                html! { <DetailModal pos={pos} board={board.clone()} on_close={on_close_detail} /> }
            } else {
                html! {}
            } }
            { if let Some(g) = &*ghost {
                html! { <div style={format!(
                    "position:fixed; left:{}px; top:{}px; width:56px; height:56px; border-radius:50%; \
                     background-image:url({}); background-size:cover; transform:translate(-50%,-50%); \
                     opacity:0.7; pointer-events:none; z-index:9999; border:2px solid #6366f1;",
                    g.x, g.y, g.img
                )}></div> }
            } else {
                html! {}
            } }
        </div>
    }
}
