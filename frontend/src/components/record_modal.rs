use shared::{CleaningRecord, CleaningType, UpdateCleaningRecordRequest};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::date_utils::format_full_date;

#[derive(Properties, PartialEq)]
pub struct RecordModalProps {
    pub record: CleaningRecord,
    /// Display name of the record's tap
    pub tap_name: String,
    /// Each field edit commits a partial update for that field only
    pub on_update: Callback<(i64, UpdateCleaningRecordRequest)>,
    pub on_close: Callback<()>,
}

#[function_component(RecordModal)]
pub fn record_modal(props: &RecordModalProps) -> Html {
    let record_id = props.record.id;

    let on_time_change = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let update = UpdateCleaningRecordRequest {
                time: Some(input.value()),
                ..Default::default()
            };
            on_update.emit((record_id, update));
        })
    };

    let on_employee_change = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let update = UpdateCleaningRecordRequest {
                employee: Some(input.value()),
                ..Default::default()
            };
            on_update.emit((record_id, update));
        })
    };

    let on_type_change = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(cleaning_type) = CleaningType::from_label(&select.value()) {
                let update = UpdateCleaningRecordRequest {
                    cleaning_type: Some(cleaning_type),
                    ..Default::default()
                };
                on_update.emit((record_id, update));
            }
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h2>{"Detail čištění"}</h2>
                    <button class="icon-button" onclick={on_close}>{"×"}</button>
                </div>
                <div class="modal-body">
                    <div class="modal-row">
                        <span class="modal-label">{"Výčep:"}</span>
                        <span>{&props.tap_name}</span>
                    </div>
                    <div class="modal-row">
                        <span class="modal-label">{"Datum:"}</span>
                        <span>{format_full_date(props.record.date)}</span>
                    </div>
                    <div class="modal-row">
                        <label class="modal-label" for="record-time">{"Čas:"}</label>
                        <input
                            id="record-time"
                            type="text"
                            value={props.record.time.clone()}
                            onchange={on_time_change}
                        />
                    </div>
                    <div class="modal-row">
                        <label class="modal-label" for="record-employee">{"Zaměstnanec:"}</label>
                        <input
                            id="record-employee"
                            type="text"
                            value={props.record.employee.clone()}
                            onchange={on_employee_change}
                        />
                    </div>
                    <div class="modal-row">
                        <label class="modal-label" for="record-type">{"Typ čištění:"}</label>
                        <select id="record-type" onchange={on_type_change}>
                            {for CleaningType::ALL.iter().map(|t| html! {
                                <option
                                    value={t.label()}
                                    selected={*t == props.record.cleaning_type}
                                >
                                    {t.label()}
                                </option>
                            })}
                        </select>
                    </div>
                </div>
            </div>
        </div>
    }
}
