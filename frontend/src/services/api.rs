use gloo::net::http::Request;
use shared::{
    CleaningRecord, CreateCleaningRecordRequest, RenameTapRequest, Tap,
    UpdateCleaningRecordRequest,
};

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// List all taps, ordered by identifier
    pub async fn list_taps(&self) -> Result<Vec<Tap>, String> {
        let url = format!("{}/api/taps", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<Tap>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse taps: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch taps: {}", e)),
        }
    }

    /// Create a tap; the server assigns the id and a default name
    pub async fn create_tap(&self) -> Result<Tap, String> {
        let url = format!("{}/api/taps", self.base_url);

        match Request::post(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Tap>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse created tap: {}", e)),
                    }
                } else {
                    let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Rename a tap
    pub async fn rename_tap(&self, id: i64, name: &str) -> Result<(), String> {
        let url = format!("{}/api/taps/{}", self.base_url, id);
        let request_body = RenameTapRequest {
            name: name.to_string(),
        };

        match Request::put(&url)
            .json(&request_body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get cleaning records whose date falls in [start, end], inclusive
    pub async fn get_cleaning_records(
        &self,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<Vec<CleaningRecord>, String> {
        let url = format!(
            "{}/api/cleaning-records?start_date={}&end_date={}",
            self.base_url, start_date, end_date
        );

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<CleaningRecord>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse cleaning records: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch cleaning records: {}", e)),
        }
    }

    /// Create a cleaning record; returns the created row
    pub async fn create_cleaning_record(
        &self,
        request: CreateCleaningRecordRequest,
    ) -> Result<CleaningRecord, String> {
        let url = format!("{}/api/cleaning-records", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<CleaningRecord>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse created record: {}", e)),
                    }
                } else {
                    let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Update one or more editable fields of a cleaning record
    pub async fn update_cleaning_record(
        &self,
        id: i64,
        request: UpdateCleaningRecordRequest,
    ) -> Result<(), String> {
        let url = format!("{}/api/cleaning-records/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
