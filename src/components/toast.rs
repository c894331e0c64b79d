use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ToastProps {
    pub message: Option<String>,
    /// Bumped by the model for every new notice, so repeating the same
    /// message still re-triggers the toast.
    pub seq: u32,
}

/// Transient bottom-center notice; hides itself after three seconds.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        let has_message = props.message.is_some();
        use_effect_with(props.seq, move |_| {
            let mut timeout_id = None;
            let mut hide_cb = None;
            if has_message {
                visible.set(true);
                if let Some(window) = web_sys::window() {
                    let visible = visible.clone();
                    let cb = Closure::wrap(Box::new(move || visible.set(false)) as Box<dyn FnMut()>);
                    if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        3000,
                    ) {
                        timeout_id = Some(id);
                    }
                    hide_cb = Some(cb);
                }
            }
            move || {
                if let (Some(id), Some(window)) = (timeout_id, web_sys::window()) {
                    window.clear_timeout_with_handle(id);
                }
                drop(hide_cb);
            }
        });
    }

    match (&props.message, *visible) {
        (Some(message), true) => html! {
            <div style="position:fixed; bottom:28px; left:50%; transform:translateX(-50%); background:#111; border:1px solid rgba(255,255,255,0.1); border-left:3px solid #6366f1; color:#e4e4e7; padding:10px 20px; border-radius:12px; font-size:13px; font-weight:600; z-index:99999; pointer-events:none; box-shadow:0 16px 40px rgba(0,0,0,0.7);">
                { message }
            </div>
        },
        _ => html! {},
    }
}
