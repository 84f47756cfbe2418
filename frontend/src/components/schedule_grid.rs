use chrono::NaiveDate;
use shared::{CleaningRecord, Tap};
use std::collections::HashMap;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::date_utils::{day_name, format_short_date};

#[derive(Properties, PartialEq)]
pub struct ScheduleGridProps {
    pub taps: Vec<Tap>,
    /// Monday through Sunday of the displayed week
    pub week_days: Vec<NaiveDate>,
    /// Records fetched for the displayed week
    pub records: Vec<CleaningRecord>,
    /// Tap currently being renamed, if any
    pub editing_tap: Option<i64>,
    /// In-progress rename text
    pub tap_name_buffer: String,
    pub on_cell_click: Callback<(NaiveDate, i64)>,
    pub on_record_click: Callback<CleaningRecord>,
    pub on_start_rename: Callback<Tap>,
    pub on_rename_input: Callback<String>,
    pub on_save_rename: Callback<()>,
}

/// Index the week's records by (date, tap) for cell lookup. The first
/// fetched record wins when the store holds duplicates for a cell.
fn index_records(records: &[CleaningRecord]) -> HashMap<(NaiveDate, i64), &CleaningRecord> {
    let mut by_cell = HashMap::new();
    for record in records {
        by_cell.entry((record.date, record.tap_id)).or_insert(record);
    }
    by_cell
}

#[function_component(ScheduleGrid)]
pub fn schedule_grid(props: &ScheduleGridProps) -> Html {
    let index = index_records(&props.records);

    let tap_rows = props.taps.iter().map(|tap| {
        let tap_cell = if props.editing_tap == Some(tap.id) {
            let on_input = {
                let on_rename_input = props.on_rename_input.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_rename_input.emit(input.value());
                })
            };
            let on_save = {
                let on_save_rename = props.on_save_rename.clone();
                Callback::from(move |_: MouseEvent| {
                    on_save_rename.emit(());
                })
            };

            html! {
                <div class="tap-cell editing">
                    <input
                        type="text"
                        class="tap-name-input"
                        value={props.tap_name_buffer.clone()}
                        oninput={on_input}
                    />
                    <button class="icon-button" onclick={on_save} title="Uložit">{"✓"}</button>
                </div>
            }
        } else {
            let on_edit = {
                let on_start_rename = props.on_start_rename.clone();
                let tap = tap.clone();
                Callback::from(move |_: MouseEvent| {
                    on_start_rename.emit(tap.clone());
                })
            };

            html! {
                <div class="tap-cell">
                    <span class="tap-name">{&tap.name}</span>
                    <button class="icon-button" onclick={on_edit} title="Přejmenovat">{"✎"}</button>
                </div>
            }
        };

        let day_cells = props.week_days.iter().map(|day| {
            match index.get(&(*day, tap.id)) {
                Some(record) => {
                    let on_click = {
                        let on_record_click = props.on_record_click.clone();
                        let record = (*record).clone();
                        Callback::from(move |_: MouseEvent| {
                            on_record_click.emit(record.clone());
                        })
                    };

                    html! {
                        <div class="schedule-cell filled" onclick={on_click}>
                            <div class="record-time">{&record.time}</div>
                            <div class="record-employee">{&record.employee}</div>
                            <div class="record-type">{record.cleaning_type.label()}</div>
                        </div>
                    }
                }
                None => {
                    let on_click = {
                        let on_cell_click = props.on_cell_click.clone();
                        let day = *day;
                        let tap_id = tap.id;
                        Callback::from(move |_: MouseEvent| {
                            on_cell_click.emit((day, tap_id));
                        })
                    };

                    html! {
                        <div class="schedule-cell empty" onclick={on_click}>
                            <span class="cell-plus">{"+"}</span>
                        </div>
                    }
                }
            }
        });

        html! {
            <div class="schedule-row">
                {tap_cell}
                {for day_cells}
            </div>
        }
    });

    html! {
        <div class="schedule-grid">
            <div class="schedule-row header-row">
                <div class="tap-cell corner"></div>
                {for props.week_days.iter().map(|day| html! {
                    <div class="day-header">
                        <div class="day-name">{day_name(*day)}</div>
                        <div class="day-date">{format_short_date(*day)}</div>
                    </div>
                })}
            </div>
            {for tap_rows}
        </div>
    }
}
