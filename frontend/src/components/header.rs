use chrono::NaiveDate;
use yew::prelude::*;

use crate::services::date_utils::format_week_range;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// Monday of the displayed week
    pub week_start: NaiveDate,
    /// Sunday of the displayed week
    pub week_end: NaiveDate,
    pub on_previous_week: Callback<MouseEvent>,
    pub on_next_week: Callback<MouseEvent>,
    pub on_add_tap: Callback<MouseEvent>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    // Print hands off to the browser's native print dialog
    let on_print = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    });

    html! {
        <header class="header">
            <h1>{"Sanitace výčepů"}</h1>
            <div class="week-navigation">
                <button class="nav-button" onclick={props.on_previous_week.clone()} title="Předchozí týden">
                    {"◀"}
                </button>
                <span class="week-range">
                    {format_week_range(props.week_start, props.week_end)}
                </span>
                <button class="nav-button" onclick={props.on_next_week.clone()} title="Další týden">
                    {"▶"}
                </button>
            </div>
            <div class="header-actions">
                <button class="action-button" onclick={props.on_add_tap.clone()}>
                    {"+ Přidat výčep"}
                </button>
                <button class="action-button" onclick={on_print}>
                    {"Tisk"}
                </button>
            </div>
        </header>
    }
}
