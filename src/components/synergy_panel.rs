use crate::catalog;
use crate::storage;
use crate::synergy::{LineupSnapshot, SynergyReport};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SynergyPanelProps {
    pub report: SynergyReport,
    /// The read-only export the share feature posts to the community feed.
    pub snapshot: LineupSnapshot,
}

const TIER_COLORS: [&str; 4] = ["#6366f1", "#a855f7", "#eab308", "#22c55e"];

#[function_component(SynergyPanel)]
pub fn synergy_panel(props: &SynergyPanelProps) -> Html {
    let report = &props.report;

    if report.entries.is_empty() {
        return html! {
            <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:20px; text-align:center; opacity:0.7; font-size:13px;">
                {"Place units in your area to see synergies."}
            </div>
        };
    }

    let rows = report.entries.iter().map(|e| {
        let thr = catalog::thresholds(e.name);
        let max_thr = thr.last().copied().unwrap_or(6);
        let pct = ((e.raw_count as f64 / max_thr as f64) * 100.0).min(100.0);
        let tier_idx = thr.iter().position(|t| *t == e.active_tier).unwrap_or(0);
        let color = if e.is_active {
            TIER_COLORS.get(tier_idx).copied().unwrap_or(TIER_COLORS[0])
        } else {
            "#52525b"
        };
        let pips = thr.iter().map(|t| {
            let lit = e.active_count >= *t;
            let style = if lit {
                format!("background:{color}; border:1px solid {color};")
            } else {
                "background:transparent; border:1px solid #30363d;".to_string()
            };
            html! {
                <span style={format!("{style} display:inline-block; width:8px; height:8px; border-radius:50%; margin-right:4px;")}></span>
            }
        });
        html! {
            <div key={e.name} style="display:flex; flex-direction:column; gap:3px; padding:7px 0; border-bottom:1px solid #21262d;">
                <div style="display:flex; justify-content:space-between; align-items:center;">
                    <span style={format!("font-size:12px; font-weight:700; text-transform:uppercase; color:{};",
                        if e.is_active { "#fff" } else { "#52525b" })}>
                        { e.name }
                    </span>
                    <span style="display:flex; align-items:center; gap:8px;">
                        { if e.is_active {
                            html! { <span style={format!(
                                "font-size:10px; font-weight:700; color:{color}; border:1px solid {color}; \
                                 border-radius:10px; padding:1px 7px;")}>
                                { format!("✦ {} active", e.active_count) }
                            </span> }
                        } else {
                            html! {}
                        } }
                        <span style="font-size:11px; opacity:0.7;">{ format!("{} / {}", e.raw_count, max_thr) }</span>
                    </span>
                </div>
                <div style="background:rgba(255,255,255,0.08); border-radius:4px; height:5px; overflow:hidden;">
                    <div style={format!("width:{pct}%; height:100%; background:{};",
                        if e.is_active { color } else { "rgba(255,255,255,0.14)" })}></div>
                </div>
                <div>{ for pips }</div>
            </div>
        }
    });

    let snapshot = &props.snapshot;
    let share_url = storage::share_url().unwrap_or_default();

    html! {
        <div style="background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px;">
            <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:6px;">
                <span style="font-weight:600;">{"Synergies"}</span>
                <span style="font-size:11px; opacity:0.7;">
                    { format!("{} active", report.active_traits) }
                    { if report.meow_bonus { " · Mystic Meow bonus!" } else { "" } }
                </span>
            </div>
            { for rows }
            <div style="margin-top:10px; font-size:11px; display:flex; flex-direction:column; gap:4px;">
                <span style="color:#eab308; font-weight:700;">
                    { format!("✦ {}", snapshot.synergies) }
                </span>
                { if !share_url.is_empty() {
                    html! { <span style="opacity:0.6; word-break:break-all;">{ format!("Share: {share_url}") }</span> }
                } else {
                    html! {}
                } }
            </div>
        </div>
    }
}
