use crate::constants::{DEMAND_FILE_EXTENSIONS, UPLOAD_FAILED_MSG};
use crate::data_backend::KitchenBackend;
use crate::data_types::demand_data_types::{DemandRow, DemandSummary, DemandUpload, Season};
use crate::data_types::{LocalFile, RequestStatus};
use crate::errors::{BackendError, FormError};

/// Spreadsheet upload and the rows the backend derived from it.
#[derive(Debug, Default)]
pub struct DemandPage {
    file: Option<LocalFile>,
    season: Option<Season>,
    rows: Vec<DemandRow>,
    status: RequestStatus,
    error: Option<String>,
}

impl DemandPage {
    pub fn choose_file(&mut self, file: LocalFile) -> Result<(), FormError> {
        let accepted = file
            .extension()
            .is_some_and(|ext| DEMAND_FILE_EXTENSIONS.contains(&ext.as_str()));
        if !accepted {
            let err = FormError::InvalidFileType;
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.file = Some(file);
        self.error = None;
        Ok(())
    }

    pub fn remove_file(&mut self) {
        self.file = None;
    }

    pub fn set_season(&mut self, season: Option<Season>) {
        self.season = season;
    }

    /// Returns the request to send, or `None` if there is nothing to send right now.
    pub fn begin_upload(&mut self, date: String) -> Option<DemandUpload> {
        if self.status == RequestStatus::Submitting {
            return None;
        }
        let Some(file) = self.file.as_ref() else {
            self.error = Some(FormError::NoFileSelected.to_string());
            return None;
        };

        self.status = RequestStatus::Submitting;
        self.error = None;

        Some(DemandUpload {
            file_name: file.file_name.clone(),
            bytes: file.bytes.clone(),
            date,
            season: self.season,
        })
    }

    pub fn finish_upload(&mut self, result: Result<Vec<DemandRow>, BackendError>) {
        self.status = RequestStatus::Idle;
        match result {
            Ok(rows) => self.rows = rows,
            Err(e) => {
                log::warn!("Demand upload failed: {:?}", e);
                self.error = Some(e.server_message().unwrap_or(UPLOAD_FAILED_MSG).to_string());
            }
        }
    }

    pub async fn upload<B: KitchenBackend>(&mut self, backend: &B, date: String) {
        if let Some(upload) = self.begin_upload(date) {
            let result = backend.upload_demand(upload).await;
            self.finish_upload(result);
        }
    }

    pub fn summary(&self) -> DemandSummary {
        DemandSummary::from_rows(&self.rows)
    }

    pub fn rows(&self) -> &[DemandRow] {
        &self.rows
    }

    pub fn file(&self) -> Option<&LocalFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Submitting
    }
}

pub fn demand_to_msg(page: &DemandPage) -> String {
    let mut msg = String::from("Demand Analysis\n");

    if let Some(file) = page.file() {
        msg += &format!(
            "File: {} ({:.2} MB)\n",
            file.file_name,
            file.bytes.len() as f64 / 1024.0 / 1024.0
        );
    }
    if let Some(error) = page.error() {
        msg += &format!("\n⚠ {}\n", error);
    }

    let rows = page.rows();
    if rows.is_empty() {
        return msg;
    }

    let summary = page.summary();
    msg += &format!("\nTotal Ingredients: {}\n", summary.unique_ingredients);
    msg += &format!("Total Consumption: {}\n", summary.total_consumption);
    msg += &format!("High Risk Items:   {}\n", summary.high_risk_count);

    msg += "\nIngredient Consumption Data\n";
    msg += &format!(
        "{:<12} {:<20} {:>12}  {:<8} {}\n",
        "Date", "Ingredient", "Consumption", "Type", "Risk"
    );
    for row in rows {
        msg += &format!(
            "{:<12} {:<20} {:>12}  {:<8} {}\n",
            row.date,
            row.ingredient,
            row.consumption,
            row.kind.as_str(),
            if row.high_risk { "High Risk" } else { "Normal" }
        );
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_backend::fake_backend::{Call, FakeBackend};
    use crate::data_types::demand_data_types::DemandKind;

    fn sheet() -> LocalFile {
        LocalFile {
            file_name: "march.xlsx".to_string(),
            bytes: vec![0x50, 0x4b, 0x03, 0x04],
        }
    }

    fn row(ingredient: &str, consumption: f64, high_risk: bool) -> DemandRow {
        DemandRow {
            date: "2024-03-07".to_string(),
            ingredient: ingredient.to_string(),
            consumption,
            kind: DemandKind::Daily,
            high_risk,
        }
    }

    #[test]
    fn upload_without_file_is_refused_locally() {
        let mut page = DemandPage::default();
        assert!(page.begin_upload("2024-03-07".to_string()).is_none());
        assert_eq!(page.error(), Some("Please select a file to upload"));
        assert!(!page.is_loading());
    }

    #[test]
    fn non_spreadsheet_is_rejected() {
        let mut page = DemandPage::default();
        let err = page
            .choose_file(LocalFile {
                file_name: "notes.txt".to_string(),
                bytes: vec![],
            })
            .unwrap_err();
        assert_eq!(err, FormError::InvalidFileType);
        assert!(page.file().is_none());
    }

    #[test]
    fn second_submission_is_refused_while_pending() {
        let mut page = DemandPage::default();
        page.choose_file(sheet()).unwrap();

        assert!(page.begin_upload("2024-03-07".to_string()).is_some());
        assert!(page.is_loading());
        assert!(page.begin_upload("2024-03-07".to_string()).is_none());
    }

    #[tokio::test]
    async fn upload_replaces_rows_and_carries_season() {
        let backend = FakeBackend {
            upload: Ok(vec![
                row("Tomato", 10.0, false),
                row("Tomato", 5.0, true),
                row("Salt", 2.0, false),
            ]),
            ..Default::default()
        };
        let mut page = DemandPage::default();
        page.choose_file(sheet()).unwrap();
        page.set_season(Some(Season::Winter));

        page.upload(&backend, "2024-03-07".to_string()).await;

        assert!(!page.is_loading());
        assert_eq!(page.rows().len(), 3);
        let summary = page.summary();
        assert_eq!(summary.unique_ingredients, 2);
        assert_eq!(summary.total_consumption, 17.0);
        assert_eq!(summary.high_risk_count, 1);

        match &backend.calls()[0] {
            Call::Upload(upload) => {
                assert_eq!(upload.file_name, "march.xlsx");
                assert_eq!(upload.date, "2024-03-07");
                assert_eq!(upload.season, Some(Season::Winter));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_shows_backend_message_or_fallback() {
        let mut page = DemandPage::default();
        page.choose_file(sheet()).unwrap();

        let backend = FakeBackend {
            upload: Err(BackendError::Server {
                status: 400,
                message: Some("Invalid file type. Only Excel files are allowed".to_string()),
            }),
            ..Default::default()
        };
        page.upload(&backend, "2024-03-07".to_string()).await;
        assert_eq!(
            page.error(),
            Some("Invalid file type. Only Excel files are allowed")
        );

        let backend = FakeBackend {
            upload: Err(BackendError::Network("reset".to_string())),
            ..Default::default()
        };
        page.upload(&backend, "2024-03-07".to_string()).await;
        assert_eq!(page.error(), Some("Failed to upload file. Please try again."));
    }

    #[test]
    fn table_lists_every_row_with_badges() {
        let mut page = DemandPage::default();
        page.finish_upload(Ok(vec![row("chicken", 100.0, true), row("rice", 200.0, false)]));

        let msg = demand_to_msg(&page);
        assert!(msg.contains("Total Consumption: 300"));
        assert!(msg.contains("High Risk"));
        assert!(msg.contains("Normal"));
    }
}
