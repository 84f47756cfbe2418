use chrono::NaiveDate;
use shared::{
    advance_week, week_of, CleaningRecord, CleaningType, CreateCleaningRecordRequest, Tap,
    UpdateCleaningRecordRequest, DEFAULT_EMPLOYEE,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod services;

use components::header::Header;
use components::record_modal::RecordModal;
use components::schedule_grid::ScheduleGrid;
use services::api::ApiClient;
use services::date_utils;

/// Apply a partial update to a locally cached record
fn apply_update(record: &CleaningRecord, update: &UpdateCleaningRecordRequest) -> CleaningRecord {
    CleaningRecord {
        id: record.id,
        tap_id: record.tap_id,
        date: record.date,
        time: update.time.clone().unwrap_or_else(|| record.time.clone()),
        employee: update
            .employee
            .clone()
            .unwrap_or_else(|| record.employee.clone()),
        cleaning_type: update.cleaning_type.unwrap_or(record.cleaning_type),
    }
}

#[function_component(App)]
fn app() -> Html {
    // Week cursor: any date inside the displayed week
    let selected_date = use_state(date_utils::today);
    // Taps are cached for the component's lifetime; records only for the
    // displayed week
    let taps = use_state(Vec::<Tap>::new);
    let cleaning_records = use_state(Vec::<CleaningRecord>::new);
    // Rename state: tap being renamed plus its in-progress text
    let editing_tap = use_state(|| Option::<i64>::None);
    let tap_name_buffer = use_state(String::new);
    // Record shown in the detail modal, if any
    let modal_record = use_state(|| Option::<CleaningRecord>::None);

    let api_client = use_memo((), |_| ApiClient::new());

    // Load taps once at mount
    {
        let taps = taps.clone();
        let api_client = api_client.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match (*api_client).list_taps().await {
                    Ok(data) => taps.set(data),
                    Err(e) => gloo::console::error!(format!("Failed to load taps: {}", e)),
                }
            });
            || ()
        });
    }

    // Refetch the week's records whenever the week cursor moves
    {
        let cleaning_records = cleaning_records.clone();
        let api_client = api_client.clone();

        use_effect_with(*selected_date, move |date: &NaiveDate| {
            let week = week_of(*date);
            spawn_local(async move {
                match (*api_client).get_cleaning_records(week[0], week[6]).await {
                    Ok(data) => cleaning_records.set(data),
                    Err(e) => {
                        gloo::console::error!(format!("Failed to load cleaning records: {}", e))
                    }
                }
            });
            || ()
        });
    }

    let on_previous_week = {
        let selected_date = selected_date.clone();
        Callback::from(move |_: MouseEvent| {
            selected_date.set(advance_week(*selected_date, -1));
        })
    };

    let on_next_week = {
        let selected_date = selected_date.clone();
        Callback::from(move |_: MouseEvent| {
            selected_date.set(advance_week(*selected_date, 1));
        })
    };

    // Empty-cell click: insert a defaulted record, append locally only
    // after the store confirms and returns the created row
    let on_cell_click = {
        let cleaning_records = cleaning_records.clone();
        let api_client = api_client.clone();

        Callback::from(move |(date, tap_id): (NaiveDate, i64)| {
            let cleaning_records = cleaning_records.clone();
            let api_client = api_client.clone();

            let request = CreateCleaningRecordRequest {
                tap_id,
                date,
                time: date_utils::current_time(),
                employee: DEFAULT_EMPLOYEE.to_string(),
                cleaning_type: CleaningType::Routine,
            };

            spawn_local(async move {
                match (*api_client).create_cleaning_record(request).await {
                    Ok(record) => {
                        let mut records = (*cleaning_records).clone();
                        records.push(record);
                        cleaning_records.set(records);
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Failed to create cleaning record: {}", e))
                    }
                }
            });
        })
    };

    let on_record_click = {
        let modal_record = modal_record.clone();
        Callback::from(move |record: CleaningRecord| {
            modal_record.set(Some(record));
        })
    };

    let on_close_modal = {
        let modal_record = modal_record.clone();
        Callback::from(move |_: ()| {
            modal_record.set(None);
        })
    };

    // Field edit in the modal: commit the partial update, then mirror it
    // into the local record list and the open modal
    let on_modal_update = {
        let cleaning_records = cleaning_records.clone();
        let modal_record = modal_record.clone();
        let api_client = api_client.clone();

        Callback::from(move |(id, update): (i64, UpdateCleaningRecordRequest)| {
            let cleaning_records = cleaning_records.clone();
            let modal_record = modal_record.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match (*api_client).update_cleaning_record(id, update.clone()).await {
                    Ok(()) => {
                        let records = (*cleaning_records)
                            .iter()
                            .map(|r| if r.id == id { apply_update(r, &update) } else { r.clone() })
                            .collect();
                        cleaning_records.set(records);

                        if let Some(open) = (*modal_record).as_ref() {
                            if open.id == id {
                                modal_record.set(Some(apply_update(open, &update)));
                            }
                        }
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Failed to update cleaning record: {}", e))
                    }
                }
            });
        })
    };

    // Entering rename mode captures the current name into the buffer
    let on_start_rename = {
        let editing_tap = editing_tap.clone();
        let tap_name_buffer = tap_name_buffer.clone();
        Callback::from(move |tap: Tap| {
            editing_tap.set(Some(tap.id));
            tap_name_buffer.set(tap.name);
        })
    };

    let on_rename_input = {
        let tap_name_buffer = tap_name_buffer.clone();
        Callback::from(move |text: String| {
            tap_name_buffer.set(text);
        })
    };

    let on_save_rename = {
        let taps = taps.clone();
        let editing_tap = editing_tap.clone();
        let tap_name_buffer = tap_name_buffer.clone();
        let api_client = api_client.clone();

        Callback::from(move |_: ()| {
            let Some(id) = *editing_tap else {
                return;
            };
            let name = (*tap_name_buffer).clone();

            let taps = taps.clone();
            let editing_tap = editing_tap.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match (*api_client).rename_tap(id, &name).await {
                    Ok(()) => {
                        let updated = (*taps)
                            .iter()
                            .map(|t| {
                                if t.id == id {
                                    Tap {
                                        id: t.id,
                                        name: name.clone(),
                                    }
                                } else {
                                    t.clone()
                                }
                            })
                            .collect();
                        taps.set(updated);
                        editing_tap.set(None);
                    }
                    Err(e) => gloo::console::error!(format!("Failed to rename tap: {}", e)),
                }
            });
        })
    };

    let on_add_tap = {
        let taps = taps.clone();
        let api_client = api_client.clone();

        Callback::from(move |_: MouseEvent| {
            let taps = taps.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match (*api_client).create_tap().await {
                    Ok(tap) => {
                        let mut updated = (*taps).clone();
                        updated.push(tap);
                        taps.set(updated);
                    }
                    Err(e) => gloo::console::error!(format!("Failed to create tap: {}", e)),
                }
            });
        })
    };

    let week = week_of(*selected_date);

    let modal = match (*modal_record).clone() {
        Some(record) => {
            let tap_name = taps
                .iter()
                .find(|t| t.id == record.tap_id)
                .map(|t| t.name.clone())
                .unwrap_or_default();

            html! {
                <RecordModal
                    record={record}
                    tap_name={tap_name}
                    on_update={on_modal_update}
                    on_close={on_close_modal}
                />
            }
        }
        None => html! {},
    };

    html! {
        <div class="app">
            <Header
                week_start={week[0]}
                week_end={week[6]}
                on_previous_week={on_previous_week}
                on_next_week={on_next_week}
                on_add_tap={on_add_tap}
            />
            <ScheduleGrid
                taps={(*taps).clone()}
                week_days={week.to_vec()}
                records={(*cleaning_records).clone()}
                editing_tap={*editing_tap}
                tap_name_buffer={(*tap_name_buffer).clone()}
                on_cell_click={on_cell_click}
                on_record_click={on_record_click}
                on_start_rename={on_start_rename}
                on_rename_input={on_rename_input}
                on_save_rename={on_save_rename}
            />
            {modal}
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
